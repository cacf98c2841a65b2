//! Engine configuration (`tomlprompt.toml`) and document conventions

pub mod consts;
pub mod model;

pub use model::{Config, EngineConfig, OutputConfig};
