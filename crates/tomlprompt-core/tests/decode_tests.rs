//! Integration tests for decoding runs driven from files

use std::sync::Arc;
use std::thread;
use tomlprompt_core::config::Config;
use tomlprompt_core::{Decoder, Document, TomlPromptError, decode};
use tomlprompt_testkit::{
    CHARACTER_DOCUMENT, CHARACTER_POSITIVE, CHARACTER_SELECTORS, temp_dir_in_workspace,
    write_character_fixture, write_fixture,
};

#[test]
fn test_character_fixture_decodes() {
    let decoded = decode(7, CHARACTER_DOCUMENT, CHARACTER_SELECTORS).unwrap();

    assert_eq!(decoded.positive, CHARACTER_POSITIVE);
    assert_eq!(decoded.negative, "daylight");
    assert_eq!(decoded.lora_list, "<lora:watercolor:0.7>");
    assert_eq!(decoded.seed, 7);
}

#[test]
fn test_character_fixture_loaded_keys() {
    let decoded = decode(0, CHARACTER_DOCUMENT, CHARACTER_SELECTORS).unwrap();
    let loaded: Vec<&str> = decoded.loaded_keys.iter().collect();

    assert_eq!(
        loaded,
        vec![
            "girl",
            "girl.hair.long",
            "girl.eyes",
            "scene.night",
            "watercolor",
            "scene.park",
        ]
    );
}

#[test]
fn test_decode_from_files() {
    let temp = temp_dir_in_workspace();
    let (document_path, selectors_path) = write_character_fixture(temp.path());

    let document = std::fs::read_to_string(document_path).unwrap();
    let selectors = std::fs::read_to_string(selectors_path).unwrap();
    let decoded = decode(0, &document, &selectors).unwrap();

    assert_eq!(decoded.positive, CHARACTER_POSITIVE);
}

#[test]
fn test_config_file_drives_decoder() {
    let temp = temp_dir_in_workspace();
    let config_path = write_fixture(
        temp.path(),
        "tomlprompt.toml",
        r#"
[engine]
max_depth = 1

[output]
line_separator = " / "
"#,
    );

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.engine.max_depth, 1);
    assert_eq!(config.output.lora_separator, "\n");

    let decoder = Decoder::new(config);
    let decoded = decoder.decode(0, CHARACTER_DOCUMENT, "girl.eyes\nscene.park").unwrap();
    assert_eq!(decoded.positive, "1girl, red dress,round eyes / park, trees");

    let err = decoder
        .decode(0, CHARACTER_DOCUMENT, CHARACTER_SELECTORS)
        .unwrap_err();
    assert!(matches!(err, TomlPromptError::RecursionLimit { max_depth: 1, .. }));
}

#[test]
fn test_missing_config_file() {
    let temp = temp_dir_in_workspace();
    let result = Config::from_file(temp.path().join("missing.toml"));
    assert!(matches!(result, Err(TomlPromptError::ConfigParse(_))));
}

#[test]
fn test_parallel_runs_are_independent() {
    let document: Arc<Document> = Arc::new(CHARACTER_DOCUMENT.parse().unwrap());
    let selectors = "girl.hair.?\nscene.?\n{girl.eyes|scene.park}";

    let expected = Decoder::default()
        .decode_document(99, &document, selectors)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let document = Arc::clone(&document);
            thread::spawn(move || {
                Decoder::default()
                    .decode_document(99, &document, selectors)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
