// Core modules
pub mod config;
pub mod document;
pub mod encoder;
pub mod error;
pub mod prompt;

// Re-export commonly used types
pub use document::Document;
pub use error::{Result, TomlPromptError};
pub use prompt::{Decoded, Decoder, decode};
