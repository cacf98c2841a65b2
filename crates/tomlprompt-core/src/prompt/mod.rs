//! Prompt module - selector resolution and text expansion
//!
//! This module turns a prompt document plus a list of selector lines into
//! positive and negative prompt text, a list of LoRA tags, and a summary.
//!
//! ## Selectors
//!
//! - Dotted paths: `hair.color.red`
//! - Alternatives per segment: `hair.long+short` (cartesian expansion)
//! - Wildcards: `?` (random child), `??` (random leaf below, terminal),
//!   `*` (every child), `**` (every leaf below, terminal)
//! - Several comma-separated selectors or tags per line
//!
//! ## Leaf text
//!
//! - Comments: `// ...`, `# ...`, `/* ... */`
//! - Random choice: `{a|b|c}`
//! - Variables: `${name}` (leaf `_v` table), `${g.name}` (top-level `_v`)
//!
//! ## Tags
//!
//! - `<lora:name:strength>`: records the LoRA, expands to its `<lora>` text
//! - `<if:a,b:then:else>` / `<if_not:a,b:then:else>`: branch on loaded keys
//! - `<raw:text>`: literal text
//! - `<!:text>`: moves `text` to the negative prompt

pub mod context;
pub mod decoder;
pub mod keys;
pub mod line;
pub mod sanitize;
pub mod tags;
pub mod vars;

mod resolver;

pub use context::{LoadedKeys, LoraTag, RunContext};
pub use decoder::{Decoded, Decoder, decode};
pub use keys::{Segment, build_search_keys};
pub use line::{LineOutput, load_prompt_line, split_line};
pub use sanitize::{select_dynamic_choice, strip_comments};
pub use tags::Tag;
pub use vars::expand_variables;

#[cfg(test)]
mod tests;
