//! `${name}` and `${g.name}` substitution
//!
//! Local names resolve against the leaf's own `_v` table, `g.`-prefixed
//! names against the document's top-level `_v` table. Anything missing
//! expands to an empty string with a warning; expansion never fails.

use crate::config::consts::document::GLOBAL_VAR_PREFIX;
use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::{Captures, Regex};
use toml::{Table, Value};

static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([a-zA-Z0-9_.]+)\}").unwrap());

/// Expand every variable reference in `text`
pub fn expand_variables<R: Rng + ?Sized>(
    text: &str,
    local: Option<&Table>,
    globals: Option<&Table>,
    rng: &mut R,
) -> String {
    VARIABLE_REGEX
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let (table, var) = match name.strip_prefix(GLOBAL_VAR_PREFIX) {
                Some(var) => (globals, var),
                None => (local, name),
            };

            let Some(table) = table else {
                tracing::warn!("Variable table not set for '${{{}}}' in: {}", name, text);
                return String::new();
            };

            pick_candidate(table.get(var), rng).unwrap_or_else(|| {
                tracing::warn!("Variable not set: '${{{}}}' in: {}", name, text);
                String::new()
            })
        })
        .into_owned()
}

/// Draw one candidate; a bare scalar is its own single candidate
fn pick_candidate<R: Rng + ?Sized>(value: Option<&Value>, rng: &mut R) -> Option<String> {
    match value? {
        Value::Array(items) => items.choose(rng).map(stringify),
        other => Some(stringify(other)),
    }
}

fn stringify(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use toml::toml;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_expand_local_variable() {
        let local = toml! { hair = ["long"] };
        let result = expand_variables("${hair} hair", Some(&local), None, &mut rng());
        assert_eq!(result, "long hair");
    }

    #[test]
    fn test_expand_global_variable() {
        let globals = toml! { color = ["red"] };
        let result = expand_variables("${g.color} eyes", None, Some(&globals), &mut rng());
        assert_eq!(result, "red eyes");
    }

    #[test]
    fn test_local_and_global_are_separate_scopes() {
        let local = toml! { color = ["blue"] };
        let globals = toml! { color = ["red"] };
        let result =
            expand_variables("${color}/${g.color}", Some(&local), Some(&globals), &mut rng());
        assert_eq!(result, "blue/red");
    }

    #[test]
    fn test_missing_local_table_expands_to_empty() {
        let globals = toml! { color = ["red"] };
        let result = expand_variables("a ${hair} b", None, Some(&globals), &mut rng());
        assert_eq!(result, "a  b");
    }

    #[test]
    fn test_missing_name_expands_to_empty() {
        let local = toml! { hair = ["long"] };
        let result = expand_variables("[${eyes}]", Some(&local), None, &mut rng());
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_empty_candidate_list_expands_to_empty() {
        let local = toml! { hair = [] };
        let result = expand_variables("[${hair}]", Some(&local), None, &mut rng());
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_pick_is_one_of_candidates() {
        let local = toml! { mood = ["happy", "sad", "calm"] };
        let mut rng = rng();
        for _ in 0..30 {
            let result = expand_variables("${mood}", Some(&local), None, &mut rng);
            assert!(["happy", "sad", "calm"].contains(&result.as_str()));
        }
    }

    #[test]
    fn test_scalar_variable_is_single_candidate() {
        let local = toml! { size = "large" };
        let result = expand_variables("${size}", Some(&local), None, &mut rng());
        assert_eq!(result, "large");
    }

    #[test]
    fn test_text_without_references_is_unchanged() {
        let result = expand_variables("no $vars {here}", None, None, &mut rng());
        assert_eq!(result, "no $vars {here}");
    }
}
