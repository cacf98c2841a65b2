//! CLI command structure using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tomlprompt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to tomlprompt.toml (defaults to ./tomlprompt.toml when present)
    #[arg(long, global = true, env = "TOMLPROMPT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a selector list against a prompt document
    Decode {
        /// Prompt document (TOML)
        #[arg(short, long)]
        document: PathBuf,

        /// Selector list file, or `-` for stdin
        #[arg(short, long)]
        selectors: PathBuf,

        /// Seed for every random choice of the run
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Print only one part of the result
        #[arg(short, long, value_enum, default_value_t = OutputPart::Summary)]
        output: OutputPart,
    },

    /// List the selectable paths of a prompt document
    Keys {
        /// Prompt document (TOML)
        document: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Part of a decoding result printed by `decode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputPart {
    Positive,
    Negative,
    Loras,
    Summary,
}
