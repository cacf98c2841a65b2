use serde::{Deserialize, Serialize};

use super::consts::defaults;
use crate::error::{Result, TomlPromptError};

/// tomlprompt.toml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hard limit on nested line loads
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::MAX_DEPTH,
        }
    }
}

fn default_max_depth() -> usize {
    defaults::MAX_DEPTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_line_separator")]
    pub line_separator: String,
    #[serde(default = "default_lora_separator")]
    pub lora_separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_separator: defaults::LINE_SEPARATOR.to_string(),
            lora_separator: defaults::LORA_SEPARATOR.to_string(),
        }
    }
}

fn default_line_separator() -> String {
    defaults::LINE_SEPARATOR.to_string()
}

fn default_lora_separator() -> String {
    defaults::LORA_SEPARATOR.to_string()
}

impl Config {
    /// Read and validate a tomlprompt.toml
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TomlPromptError::ConfigParse(e.to_string()))?;

        Self::from_str_toml(&content)
    }

    /// Parse and validate config text
    pub fn from_str_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| TomlPromptError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.engine.max_depth == 0 {
            return Err(TomlPromptError::ConfigInvalid {
                field: "engine.max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
