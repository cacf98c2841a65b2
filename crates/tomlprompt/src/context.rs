//! Configuration lookup for CLI commands

use anyhow::{Context as _, Result};
use std::path::Path;
use tomlprompt_core::config::Config;
use tomlprompt_core::config::consts::defaults::CONFIG_FILE;

/// Load the engine configuration
///
/// An explicit path must exist. Without one, `tomlprompt.toml` in the
/// current directory is used when present, else the defaults.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read, parsed or validated.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let local = std::env::current_dir()?.join(CONFIG_FILE);
            if !local.is_file() {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                return Ok(Config::default());
            }
            local
        }
    };

    tracing::debug!("Load Config: {}", path.display());
    Config::from_file(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Read a text input; `-` reads stdin
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
