//! Constants shared across the engine

/// Reserved names inside a prompt document
pub mod document {
    /// Keys starting with this prefix are metadata and never selectable
    pub const RESERVED_PREFIX: char = '_';

    /// Text field that turns a table into a templated leaf
    pub const TEXT_FIELD: &str = "_t";

    /// Variable table field (local on a leaf, global at the document root)
    pub const VARS_FIELD: &str = "_v";

    /// Top-level table holding per-LoRA descriptive prompts
    pub const LORA_TABLE: &str = "<lora>";

    /// Prefix that routes `${g.name}` to the global variable table
    pub const GLOBAL_VAR_PREFIX: &str = "g.";
}

/// Defaults for `tomlprompt.toml`
pub mod defaults {
    /// Maximum nesting of line loads (`<if>` branches re-entering the loader)
    pub const MAX_DEPTH: usize = 32;

    /// Separator between the lines of the positive and negative outputs
    pub const LINE_SEPARATOR: &str = ",\n";

    /// Separator between accumulated LoRA tags
    pub const LORA_SEPARATOR: &str = "\n";

    /// Separator between per-line prompts handed to the encoder
    pub const BREAK_SEPARATOR: &str = "\nBREAK\n";

    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &str = "tomlprompt.toml";
}
