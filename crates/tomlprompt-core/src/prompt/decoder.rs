//! Run orchestration: seed, selector list, per-line loading, final joins

use super::context::{LoadedKeys, LoraTag, RunContext};
use super::line::{LineOutput, load_prompt_line};
use super::sanitize::{select_dynamic_choice, strip_comments};
use crate::config::Config;
use crate::config::consts::defaults::BREAK_SEPARATOR;
use crate::document::Document;
use crate::encoder::LoraWeight;
use crate::error::Result;
use serde::Serialize;

/// Result of one decoding run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    /// Non-empty positive line outputs, joined
    pub positive: String,
    /// Non-empty negative line outputs, joined
    pub negative: String,
    /// Accumulated LoRA tags, joined
    pub lora_list: String,
    pub seed: u64,
    /// Distinct LoRA tags in first-seen order
    pub loras: Vec<LoraTag>,
    /// Output of every line that resolved to something
    pub lines: Vec<LineOutput>,
    /// Exclusion set at the end of the run
    pub loaded_keys: LoadedKeys,
}

impl Decoded {
    /// Labelled multi-section report of the run
    pub fn summary(&self) -> String {
        format!(
            "---- Positive ----\n{}\n\n---- Negative ----\n{}\n\n---- LoRA ----\n{}\n\n---- Seed ----\n{}",
            self.positive, self.negative, self.lora_list, self.seed
        )
    }

    /// `(name, strength)` pairs in resolution order
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrength` if a strength is not a number.
    pub fn lora_weights(&self) -> Result<Vec<LoraWeight>> {
        self.loras.iter().map(LoraTag::weight).collect()
    }

    /// Per-line positive prompts separated by `BREAK` lines
    pub fn break_joined(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.positive.as_str())
            .filter(|positive| !positive.is_empty())
            .collect::<Vec<_>>()
            .join(BREAK_SEPARATOR)
    }
}

/// Drives selector lists through the prompt engine
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: Config,
}

impl Decoder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse `document` and decode `selectors` against it
    ///
    /// # Errors
    ///
    /// Returns `DocumentParse` for malformed TOML, and any fatal selector or
    /// recursion error raised while resolving a line.
    pub fn decode(&self, seed: u64, document: &str, selectors: &str) -> Result<Decoded> {
        let document = Document::parse(document)?;
        self.decode_document(seed, &document, selectors)
    }

    /// Decode `selectors` against an already parsed document
    pub fn decode_document(
        &self,
        seed: u64,
        document: &Document,
        selectors: &str,
    ) -> Result<Decoded> {
        let mut ctx = RunContext::new(seed, self.config.engine.max_depth);
        let selectors = select_dynamic_choice(&strip_comments(selectors), &mut ctx.rng);

        let mut lines = Vec::new();
        for line in selectors.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(output) = load_prompt_line(&mut ctx, document, line)? {
                lines.push(output);
            }
        }

        let (loaded_keys, loras) = ctx.into_parts();
        let separator = &self.config.output.line_separator;

        Ok(Decoded {
            positive: join_non_empty(lines.iter().map(|l| l.positive.as_str()), separator),
            negative: join_non_empty(lines.iter().map(|l| l.negative.as_str()), separator),
            lora_list: loras
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(self.config.output.lora_separator.as_str()),
            seed,
            loras,
            lines,
            loaded_keys,
        })
    }
}

fn join_non_empty<'a>(parts: impl Iterator<Item = &'a str>, separator: &str) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Convenience function to decode with the default configuration
pub fn decode(seed: u64, document: &str, selectors: &str) -> Result<Decoded> {
    Decoder::default().decode(seed, document, selectors)
}
