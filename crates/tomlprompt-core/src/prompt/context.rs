//! Run-scoped mutable state

use crate::encoder::LoraWeight;
use crate::error::{Result, TomlPromptError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt;

/// Ordered record of dotted paths (and LoRA names) resolved so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LoadedKeys(Vec<String>);

impl LoadedKeys {
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// Append `key` unless already present; returns whether it was added
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.0.push(key);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A `<lora:name:strength>` tag seen during tag expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoraTag {
    pub name: String,
    pub strength: String,
}

impl LoraTag {
    pub fn new(name: &str, strength: &str) -> Self {
        Self {
            name: name.to_string(),
            strength: strength.to_string(),
        }
    }

    /// Parse the strength for the host
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrength` for digit-and-dot strings that are not a
    /// number, such as `1.2.3`.
    pub fn weight(&self) -> Result<LoraWeight> {
        let strength = self
            .strength
            .parse::<f32>()
            .map_err(|_| TomlPromptError::InvalidStrength {
                name: self.name.clone(),
                strength: self.strength.clone(),
            })?;

        Ok(LoraWeight {
            name: self.name.clone(),
            strength,
        })
    }
}

impl fmt::Display for LoraTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<lora:{}:{}>", self.name, self.strength)
    }
}

/// State threaded through every resolution call of one run
///
/// Built fresh per run and dropped afterwards. All randomness is drawn from
/// the single seeded generator held here, so a run is reproducible for a
/// given seed, document and selector list.
pub struct RunContext {
    pub(crate) rng: StdRng,
    pub(crate) loaded: LoadedKeys,
    pub(crate) loras: Vec<LoraTag>,
    depth: usize,
    max_depth: usize,
}

impl RunContext {
    pub fn new(seed: u64, max_depth: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            loaded: LoadedKeys::default(),
            loras: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    pub fn loaded(&self) -> &LoadedKeys {
        &self.loaded
    }

    pub fn loras(&self) -> &[LoraTag] {
        &self.loras
    }

    /// Record a LoRA tag; the first sighting also marks its name as loaded
    pub(crate) fn register_lora(&mut self, name: &str, strength: &str) {
        let tag = LoraTag::new(name, strength);
        if self.loras.contains(&tag) {
            return;
        }
        self.loras.push(tag);
        self.loaded.insert(name);
    }

    /// Enter one level of line loading
    pub(crate) fn enter(&mut self, line: &str) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(TomlPromptError::RecursionLimit {
                max_depth: self.max_depth,
                line: line.to_string(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn into_parts(self) -> (LoadedKeys, Vec<LoraTag>) {
        (self.loaded, self.loras)
    }
}
