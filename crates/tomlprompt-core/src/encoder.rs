//! Host-side encoding seam
//!
//! Decoding produces text and LoRA tags only. Applying LoRA weights to a
//! model and turning text into conditioning belongs to the host, which
//! plugs in through [`Conditioner`]. [`encode_decoded`] drives the host in
//! the order the host expects: every LoRA first, then one encode per line.

use crate::error::Result;
use crate::prompt::Decoded;
use serde::Serialize;

/// A LoRA name with its parsed strength
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoraWeight {
    pub name: String,
    pub strength: f32,
}

/// Host operations needed to turn a decoded run into conditioning
pub trait Conditioner {
    type Conditioning;

    /// Load a LoRA into the host's model and text encoder
    fn apply_lora(&mut self, lora: &LoraWeight) -> Result<()>;

    /// Encode prompt text
    fn encode(&mut self, text: &str) -> Result<Self::Conditioning>;

    /// Concatenate a newly encoded line onto what was encoded so far
    fn concat(
        &mut self,
        newer: Self::Conditioning,
        accumulated: Self::Conditioning,
    ) -> Result<Self::Conditioning>;
}

/// Apply LoRAs and encode every positive line of `decoded`
///
/// Each LoRA name is applied once, with the strength of its first tag.
/// When no line produced text, the empty prompt is encoded instead.
///
/// # Errors
///
/// Propagates `InvalidStrength` and any error reported by the host.
pub fn encode_decoded<C: Conditioner>(decoded: &Decoded, host: &mut C) -> Result<C::Conditioning> {
    let weights = decoded.lora_weights()?;
    let mut applied: Vec<&str> = Vec::new();
    for weight in &weights {
        if applied.contains(&weight.name.as_str()) {
            continue;
        }
        host.apply_lora(weight)?;
        tracing::info!("Lora Loaded: {}: {}", weight.name, weight.strength);
        applied.push(&weight.name);
    }

    let mut accumulated = None;
    for line in decoded.lines.iter().filter(|l| !l.positive.is_empty()) {
        let conditioning = host.encode(&line.positive)?;
        accumulated = Some(match accumulated {
            Some(previous) => host.concat(conditioning, previous)?,
            None => conditioning,
        });
    }

    match accumulated {
        Some(conditioning) => Ok(conditioning),
        None => host.encode(""),
    }
}
