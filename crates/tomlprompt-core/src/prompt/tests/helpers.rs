//! Shared test helpers for prompt engine tests

use crate::document::Document;
use crate::error::Result;
use crate::prompt::context::RunContext;
use crate::prompt::keys::build_search_keys;
use crate::prompt::resolver::{KeySplit, TreeResolver};
use toml::toml;

/// A character document exercising every leaf kind
pub(super) fn character_document() -> Document {
    Document::parse(
        r#"
_v = { color = ["red"] }

[girl]
_t = "1girl, ${g.color} dress"

[girl.hair]
long = "long hair"
short = "short hair"

[girl.eyes]
_t = "${shape} eyes"
_v = { shape = ["round"] }

[scene]
park = "park"
beach = "beach"

[style.anime]
_t = "anime style"
cel = "cel shading"

[empty]
"#,
    )
    .unwrap()
}

/// Two flat string leaves and a two-level table for fan-out tests
pub(super) fn pair_document() -> Document {
    Document::from_table(toml! {
        [x]
        p = "P"
        q = "Q"

        [outfit.casual]
        top = "tee"

        [outfit.formal]
        top = "shirt"
    })
}

/// Parse a document from text
pub(super) fn document(text: &str) -> Document {
    Document::parse(text).unwrap()
}

/// A fresh run context with the default depth limit
pub(super) fn context(seed: u64) -> RunContext {
    RunContext::new(seed, 32)
}

/// Expand `selector` and resolve it from the document root
pub(super) fn resolve(ctx: &mut RunContext, doc: &Document, selector: &str) -> Result<Vec<String>> {
    let keys = build_search_keys(selector);
    TreeResolver::new(&mut ctx.rng, &mut ctx.loaded, doc.globals()).collect_prompt(
        doc.root(),
        &keys,
        &[],
        KeySplit::Dotted,
    )
}
