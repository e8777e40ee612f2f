use std::fs;
use std::path::{Path, PathBuf};

use keysync_keybinds::*;
use tempfile::TempDir;

fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_merge_drops_cross_source_duplicate() {
    let dir = TempDir::new().unwrap();
    let first = write_source(dir.path(), "a.jsonc", r#"[{"key":"ctrl+n","command":"new"}]"#);
    let second = write_source(
        dir.path(),
        "b.jsonc",
        r#"[{"key":"ctrl+n","command":"new"},{"key":"ctrl+s","command":"save"}]"#,
    );

    let result = KeybindMerger::merge(&[first, second]);

    assert_eq!(
        result.records,
        vec![
            BindingRecord::new("ctrl+n", "new"),
            BindingRecord::new("ctrl+s", "save"),
        ]
    );
    assert_eq!(result.duplicates_dropped, 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_merge_keeps_bindings_differing_only_in_when() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        dir.path(),
        "a.jsonc",
        r#"[{"key":"ctrl+p","command":"x","when":"a"},{"key":"ctrl+p","command":"x"}]"#,
    );

    let result = KeybindMerger::merge(&[source]);
    assert_eq!(result.records.len(), 2);
}

#[test]
fn test_source_order_decides_winner() {
    let dir = TempDir::new().unwrap();
    let first = write_source(
        dir.path(),
        "first.jsonc",
        r#"[{"key":"k","command":"type","args":{"text":"first"}}]"#,
    );
    let second = write_source(
        dir.path(),
        "second.jsonc",
        r#"[{"key":"k","command":"type","args":{"text":"second"}}]"#,
    );

    let forward = KeybindMerger::merge(&[first.clone(), second.clone()]);
    let backward = KeybindMerger::merge(&[second, first]);

    assert_eq!(forward.records[0].args, Some(serde_json::json!({"text": "first"})));
    assert_eq!(backward.records[0].args, Some(serde_json::json!({"text": "second"})));
}

#[test]
fn test_bad_sources_are_skipped_with_warnings() {
    let dir = TempDir::new().unwrap();
    let good = write_source(dir.path(), "good.jsonc", r#"[{"key":"a","command":"b"}]"#);
    let broken = write_source(dir.path(), "broken.jsonc", "[{");
    let object = write_source(dir.path(), "object.jsonc", "{}");
    let missing = dir.path().join("missing.jsonc");

    let result = KeybindMerger::merge(&[broken, good, missing, object]);

    assert_eq!(result.records, vec![BindingRecord::new("a", "b")]);
    assert_eq!(result.sources_read, 4);
    assert_eq!(result.skipped_files(), vec!["broken.jsonc", "object.jsonc"]);
}

#[test]
fn test_merge_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        write_source(
            dir.path(),
            "a.jsonc",
            r#"[{"key":"a","command":"1"},{"key":"b","command":"2","when":"x"}]"#,
        ),
        write_source(
            dir.path(),
            "b.jsonc",
            r#"[{"key":"b","command":"2","when":"x"},{"key":"c","command":"3"}]"#,
        ),
    ];

    let first = render_keybindings(&KeybindMerger::merge(&sources).records).unwrap();
    let second = render_keybindings(&KeybindMerger::merge(&sources).records).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_remerging_output_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        write_source(
            dir.path(),
            "a.jsonc",
            r#"
            // base
            [
                {"key": "ctrl+a", "command": "selectAll", "when": ""},
                {"key": "ctrl+b", "command": "bold", "args": {"level": 1}},
                {"key": "ctrl+c", "command": "copy", "when": "editorFocus"},
            ]"#,
        ),
        write_source(
            dir.path(),
            "b.jsonc",
            r#"[{"key": "ctrl+a", "command": "selectAll"}, {"key": "ctrl+d", "command": "dup", "args": null}]"#,
        ),
    ];

    let merged = KeybindMerger::merge(&sources);
    let output = dir.path().join("keybindings.json");
    write_keybindings(&output, &merged.records).unwrap();

    let remerged = KeybindMerger::merge(&[output]);
    assert_eq!(remerged.records, merged.records);
    assert_eq!(remerged.duplicates_dropped, 0);
}

#[tokio::test]
async fn test_concurrent_merge_matches_sequential_merge() {
    let dir = TempDir::new().unwrap();
    let sources: Vec<PathBuf> = (0..8)
        .map(|i| {
            write_source(
                dir.path(),
                &format!("{}.jsonc", i),
                &format!(
                    r#"[{{"key":"k{}","command":"c"}},{{"key":"shared","command":"s","args":{}}}]"#,
                    i, i
                ),
            )
        })
        .collect();

    let sequential = KeybindMerger::merge(&sources);
    let concurrent = KeybindMerger::merge_concurrent(&sources).await;

    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.records[1].args, Some(serde_json::json!(0)));
}
