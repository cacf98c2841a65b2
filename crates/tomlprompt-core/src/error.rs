use thiserror::Error;

#[derive(Error, Debug)]
pub enum TomlPromptError {
    // Document errors
    #[error("DOCUMENT_PARSE_ERROR: failed to parse prompt document: {0}")]
    DocumentParse(String),

    // Selector errors
    #[error("SELECTOR_NON_TERMINAL_WILDCARD: '{segment}' must be the last segment of '{selector}'")]
    NonTerminalWildcard { segment: String, selector: String },

    #[error("SELECTOR_EMPTY_CHOICE: nothing to choose from at '{path}'")]
    EmptyChoice { path: String },

    // Expansion errors
    #[error("EXPANSION_RECURSION_LIMIT: nesting exceeded {max_depth} levels while expanding '{line}'")]
    RecursionLimit { max_depth: usize, line: String },

    #[error("LORA_INVALID_STRENGTH: '{strength}' is not a valid strength for LoRA '{name}'")]
    InvalidStrength { name: String, strength: String },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParse(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalid { field: String, reason: String },

    // Host errors
    #[error("HOST_ERROR: {0}")]
    Host(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for TomlPromptError {
    fn from(err: toml::de::Error) -> Self {
        TomlPromptError::DocumentParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TomlPromptError>;
