//! Tag expansion over resolved line text
//!
//! Expansion runs as a fixed sequence of full passes, each rewriting only
//! the tag kind it owns and leaving every other tag in place for the passes
//! after it: `raw`, `!`, `if`, `if_not`, `lora`. Before the passes, the
//! original text is scanned once to register LoRA tags and collect
//! negative fragments.

mod tokenize;

pub use tokenize::{Tag, TagStream, TagToken, is_numeric_strength, single_tag};

use super::context::{LoadedKeys, RunContext};
use super::line::load_prompt_line;
use super::resolver::{KeySplit, TreeResolver};
use crate::document::Document;
use crate::error::Result;

/// Positive and negative text of one expanded block
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expanded {
    pub positive: String,
    pub negative: String,
}

/// Expand every tag in `text`
pub(crate) fn expand_tags(ctx: &mut RunContext, doc: &Document, text: &str) -> Result<Expanded> {
    let mut negative = Vec::new();
    for token in TagStream::new(text) {
        match token.tag {
            Tag::Lora { name, strength } => ctx.register_lora(name, strength),
            Tag::Negative(fragment) => negative.push(fragment),
            _ => {}
        }
    }

    let positive = rewrite(text, |tag| match tag {
        Tag::Raw(inner) => Ok(Some(inner.to_string())),
        _ => Ok(None),
    })?;

    let positive = rewrite(&positive, |tag| match tag {
        Tag::Negative(_) => Ok(Some(String::new())),
        _ => Ok(None),
    })?;

    let positive = rewrite(&positive, |tag| match tag {
        Tag::If {
            conditions,
            then_line,
            else_line,
        } => {
            let fires = conditions.iter().all(|c| ctx.loaded.contains(c));
            branch(ctx, doc, if fires { then_line } else { else_line }).map(Some)
        }
        _ => Ok(None),
    })?;

    let positive = rewrite(&positive, |tag| match tag {
        Tag::IfNot {
            conditions,
            then_line,
            else_line,
        } => {
            let fires = !conditions.iter().any(|c| ctx.loaded.contains(c));
            branch(ctx, doc, if fires { then_line } else { else_line }).map(Some)
        }
        _ => Ok(None),
    })?;

    let positive = rewrite(&positive, |tag| match tag {
        Tag::Lora { name, strength } if is_numeric_strength(strength) => {
            lora_prompt(ctx, doc, name).map(Some)
        }
        _ => Ok(None),
    })?;

    Ok(Expanded {
        positive,
        negative: negative.join(","),
    })
}

/// Replace the tags `replace` claims; keep everything else verbatim
fn rewrite<'t, F>(text: &'t str, mut replace: F) -> Result<String>
where
    F: FnMut(&Tag<'t>) -> Result<Option<String>>,
{
    let mut output = String::with_capacity(text.len());
    let mut pos = 0;

    for token in TagStream::new(text) {
        if let Some(replacement) = replace(&token.tag)? {
            output.push_str(&text[pos..token.start]);
            output.push_str(&replacement);
            pos = token.end();
        }
    }

    output.push_str(&text[pos..]);
    Ok(output)
}

/// Positive output of a conditional branch line
fn branch(ctx: &mut RunContext, doc: &Document, line: &str) -> Result<String> {
    Ok(load_prompt_line(ctx, doc, line)?
        .map(|output| output.positive)
        .unwrap_or_default())
}

/// Descriptive prompt of a LoRA from the document's `<lora>` table
///
/// The name is looked up as one exact key, with `\` normalised to `/`.
/// Resolution uses its own exclusion set, so the description is emitted on
/// every occurrence of the tag.
fn lora_prompt(ctx: &mut RunContext, doc: &Document, name: &str) -> Result<String> {
    let Some(table) = doc.lora_table() else {
        return Ok(String::new());
    };

    let key = name.replace('\\', "/");
    let mut loaded = LoadedKeys::default();
    let mut resolver = TreeResolver::new(&mut ctx.rng, &mut loaded, doc.globals());
    let resolved = resolver.collect_prompt(table, &[key], &[], KeySplit::Exact)?;
    Ok(resolved.join(","))
}
