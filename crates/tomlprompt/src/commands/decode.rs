//! Decode command - expand a selector list against a prompt document

use crate::cli::OutputPart;
use crate::context::{load_config, read_input};
use crate::output::{print_json, print_text};
use anyhow::Result;
use std::path::PathBuf;
use tomlprompt_core::{Decoded, Decoder};

/// Arguments of `tomlprompt decode`
pub struct DecodeArgs {
    pub document: PathBuf,
    pub selectors: PathBuf,
    pub seed: u64,
    pub json: bool,
    pub output: OutputPart,
}

/// Decode a selector list and print the result
///
/// # Arguments
///
/// * `args` - Input files, seed and output selection
/// * `config` - Optional explicit path to tomlprompt.toml
pub fn run(args: DecodeArgs, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let document = read_input(&args.document)?;
    let selectors = read_input(&args.selectors)?;

    tracing::debug!(
        "Decode: document={} seed={}",
        args.document.display(),
        args.seed
    );
    let decoded = Decoder::new(config).decode(args.seed, &document, &selectors)?;

    if args.json {
        print_json(&serde_json::to_string_pretty(&decoded)?)?;
    } else {
        print_text(&render_part(&decoded, args.output))?;
    }

    Ok(())
}

fn render_part(decoded: &Decoded, part: OutputPart) -> String {
    match part {
        OutputPart::Positive => decoded.positive.clone(),
        OutputPart::Negative => decoded.negative.clone(),
        OutputPart::Loras => decoded.lora_list.clone(),
        OutputPart::Summary => decoded.summary(),
    }
}
