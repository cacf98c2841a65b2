//! Line loading: one selector line to positive/negative text

use super::context::RunContext;
use super::keys::build_search_keys;
use super::resolver::{KeySplit, TreeResolver};
use super::tags::{expand_tags, single_tag};
use crate::document::Document;
use crate::error::Result;
use serde::Serialize;

/// Output of one selector line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOutput {
    pub positive: String,
    pub negative: String,
}

/// Split a line on commas, keeping `<...>` runs as atomic tokens
///
/// Text tokens are trimmed; empty tokens are dropped.
pub fn split_line(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some((start, end)) = next_bracket(line, pos) {
        push_comma_separated(&line[pos..start], &mut tokens);
        tokens.push(&line[start..end]);
        pos = end;
    }
    push_comma_separated(&line[pos..], &mut tokens);

    tokens
}

/// Next `<...>` run with at least one character inside
fn next_bracket(line: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    loop {
        let open = search + line[search..].find('<')?;
        let close = open + 1 + line[open + 1..].find('>')?;
        if close > open + 1 {
            return Some((open, close + 1));
        }
        search = open + 1;
    }
}

fn push_comma_separated<'a>(text: &'a str, tokens: &mut Vec<&'a str>) {
    tokens.extend(text.split(',').map(str::trim).filter(|t| !t.is_empty()));
}

/// Drop blank comma-separated fragments left behind by removed tags
fn tidy(text: &str) -> String {
    text.split(',')
        .filter(|fragment| !fragment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(",")
        .trim()
        .to_string()
}

/// Resolve one selector line
///
/// Tag tokens pass through verbatim; every other token is a selector
/// resolved from the document root. Returns `None` when the line resolves
/// to nothing.
///
/// # Errors
///
/// Fails on malformed selectors and when nested `<if>` branches exceed the
/// configured depth.
pub fn load_prompt_line(
    ctx: &mut RunContext,
    doc: &Document,
    line: &str,
) -> Result<Option<LineOutput>> {
    ctx.enter(line)?;
    let result = load_line(ctx, doc, line);
    ctx.leave();
    result
}

fn load_line(ctx: &mut RunContext, doc: &Document, line: &str) -> Result<Option<LineOutput>> {
    let mut parts = Vec::new();

    for token in split_line(line) {
        if single_tag(token).is_some() {
            parts.push(token.to_string());
            continue;
        }

        let keys = build_search_keys(token);
        let mut resolver = TreeResolver::new(&mut ctx.rng, &mut ctx.loaded, doc.globals());
        let resolved = resolver.collect_prompt(doc.root(), &keys, &[], KeySplit::Dotted)?;
        if !resolved.is_empty() {
            parts.push(resolved.join(","));
        }
    }

    let text = parts.join(",");
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let expanded = expand_tags(ctx, doc, text)?;
    Ok(Some(LineOutput {
        positive: tidy(&expanded.positive),
        negative: tidy(&expanded.negative),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_selectors() {
        assert_eq!(split_line("a.b, c.d ,e"), vec!["a.b", "c.d", "e"]);
    }

    #[test]
    fn test_split_keeps_tags_atomic() {
        assert_eq!(
            split_line("a, <if:x,y:p, q:r>, b"),
            vec!["a", "<if:x,y:p, q:r>", "b"]
        );
    }

    #[test]
    fn test_split_adjacent_tags() {
        assert_eq!(
            split_line("<!:bad><lora:x:0.5>"),
            vec!["<!:bad>", "<lora:x:0.5>"]
        );
    }

    #[test]
    fn test_split_drops_empty_tokens() {
        assert_eq!(split_line(" , a,, ,b, "), vec!["a", "b"]);
        assert!(split_line("").is_empty());
    }

    #[test]
    fn test_split_unclosed_bracket_is_text() {
        assert_eq!(split_line("a, <b, c"), vec!["a", "<b", "c"]);
    }

    #[test]
    fn test_split_empty_brackets_are_text() {
        assert_eq!(split_line("a<>b, <x>"), vec!["a<>b", "<x>"]);
    }

    #[test]
    fn test_tidy_removes_blank_fragments() {
        assert_eq!(tidy(",good"), "good");
        assert_eq!(tidy("a, ,b,"), "a,b");
        assert_eq!(tidy("a, b"), "a, b");
        assert_eq!(tidy(" , "), "");
    }
}
