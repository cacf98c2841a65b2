//! Test utilities for tomlprompt
//!
//! This crate provides shared fixtures and temporary-directory helpers used
//! across the tomlprompt workspace.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small character document covering every leaf kind and tag
pub const CHARACTER_DOCUMENT: &str = r#"
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
park = "park, trees"
night = "night <!:daylight>"

["<lora>"]
watercolor = "watercolor, soft edges"
"#;

/// Selector list for `CHARACTER_DOCUMENT` with a deterministic result
pub const CHARACTER_SELECTORS: &str = r#"
// subject
girl.hair.long, girl.eyes
scene.night # time of day
<lora:watercolor:0.7>, <if:scene.night:scene.park:>
"#;

/// Positive prompt of `CHARACTER_SELECTORS` against `CHARACTER_DOCUMENT`
pub const CHARACTER_POSITIVE: &str =
    "1girl, red dress,long hair,round eyes,\nnight,\nwatercolor, soft edges,park, trees";

/// Creates a temporary directory within `.tmp/` at the project root
///
/// # Returns
///
/// A `TempDir` instance that automatically cleans up on drop.
///
/// # Panics
///
/// Panics if the current directory is unavailable or the directory cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use tomlprompt_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("prompt.toml");
/// std::fs::write(&file_path, "a = \"A\"").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `contents` to `dir/name` and return the full path
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Write the character document and selectors into `dir`
///
/// Returns `(document_path, selectors_path)`.
pub fn write_character_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    (
        write_fixture(dir, "character.toml", CHARACTER_DOCUMENT),
        write_fixture(dir, "selectors.txt", CHARACTER_SELECTORS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_lives_under_tmp() {
        let temp = temp_dir_in_workspace();
        assert!(temp.path().exists());
        assert!(temp.path().parent().unwrap().ends_with(".tmp"));
    }

    #[test]
    fn test_write_character_fixture() {
        let temp = temp_dir_in_workspace();
        let (document, selectors) = write_character_fixture(temp.path());
        assert_eq!(std::fs::read_to_string(document).unwrap(), CHARACTER_DOCUMENT);
        assert_eq!(std::fs::read_to_string(selectors).unwrap(), CHARACTER_SELECTORS);
    }
}
