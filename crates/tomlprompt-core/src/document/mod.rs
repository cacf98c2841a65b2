//! Prompt document model
//!
//! A prompt document is a TOML table whose tables are walked by selectors.
//! Strings and tables carrying a `_t` text field are leaves; every other
//! table is an interior node used only for path traversal. Keys starting
//! with `_` are metadata and never selectable.

mod node;

pub use node::{Node, SelectablePaths, enumerable_keys, selectable_paths};

use crate::config::consts::document::{LORA_TABLE, VARS_FIELD};
use crate::error::Result;
use toml::{Table, Value};

/// A parsed prompt document
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse TOML text into a document
    ///
    /// # Errors
    ///
    /// Returns `DocumentParse` if the text is not valid TOML.
    pub fn parse(text: &str) -> Result<Self> {
        let table: Table = toml::from_str(text)?;
        Ok(Self::from_table(table))
    }

    /// Wrap an already parsed table
    pub fn from_table(table: Table) -> Self {
        Self {
            root: Value::Table(table),
        }
    }

    /// Root node of the document
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Global variable table (`_v` at the document root)
    pub fn globals(&self) -> Option<&Table> {
        self.root.get(VARS_FIELD).and_then(Value::as_table)
    }

    /// The `<lora>` table of per-LoRA descriptive prompts
    pub fn lora_table(&self) -> Option<&Value> {
        self.root.get(LORA_TABLE).filter(|v| v.is_table())
    }

    /// Every selectable path below the root
    pub fn selectable_paths(&self) -> SelectablePaths {
        selectable_paths(&self.root)
    }
}

impl std::str::FromStr for Document {
    type Err = crate::error::TomlPromptError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
