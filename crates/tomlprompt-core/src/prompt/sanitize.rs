//! Comment stripping and `{a|b|c}` random choice

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::{Captures, Regex};

/// `//` or `#` followed by at least one character up to end of line, or a
/// non-greedy `/* ... */` block that may span lines.
static COMMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?://|#).+$|/\*[\s\S]*?\*/").unwrap());

static CHOICE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Remove line and block comments, then trim
pub fn strip_comments(text: &str) -> String {
    COMMENT_REGEX.replace_all(text, "").trim().to_string()
}

/// Replace every `{alt1|alt2|...}` group with one trimmed alternative
///
/// Groups are resolved left to right, each with its own draw from `rng`.
pub fn select_dynamic_choice<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    CHOICE_REGEX
        .replace_all(text, |caps: &Captures| {
            let alternatives: Vec<&str> = caps[1].split('|').collect();
            alternatives
                .choose(rng)
                .map(|alt| alt.trim().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}
