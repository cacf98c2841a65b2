//! Keys command - list what `**` and `??` can reach in a document

use crate::context::read_input;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tomlprompt_core::Document;
use tomlprompt_core::document::SelectablePaths;

/// List the selectable paths of a prompt document
///
/// # Arguments
///
/// * `document` - Path to the prompt document
/// * `json` - Output as JSON if true
pub fn run(document: PathBuf, json: bool) -> Result<()> {
    let text = read_input(&document)?;
    let paths = Document::parse(&text)?.selectable_paths();

    if json {
        print_json(&serde_json::to_string_pretty(&paths)?)?;
    } else {
        print_text(&render_human(&paths))?;
    }

    Ok(())
}

fn render_human(paths: &SelectablePaths) -> String {
    let mut out = Vec::new();

    out.push(format!("{} ({})", "Leaves".bold(), paths.leaves.len()));
    out.extend(paths.leaves.iter().map(|leaf| format!("  {leaf}")));

    if !paths.templated.is_empty() {
        out.push(String::new());
        out.push(format!(
            "{} ({})",
            "Templated".bold(),
            paths.templated.len()
        ));
        out.extend(paths.templated.iter().map(|path| format!("  {}", path.cyan())));
    }

    out.join("\n")
}
