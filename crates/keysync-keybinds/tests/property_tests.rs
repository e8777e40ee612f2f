//! Property-based tests for the merge
//!
//! Covers identity uniqueness, first-wins ordering and idempotence of
//! re-merging rendered output.

use std::collections::HashSet;
use std::path::Path;

use keysync_keybinds::reader::read_text;
use keysync_keybinds::*;
use proptest::prelude::*;

/// Small alphabets so generated lists collide often
fn binding_strategy() -> impl Strategy<Value = BindingRecord> {
    (
        prop_oneof![Just("ctrl+a"), Just("ctrl+b"), Just("alt+x")],
        prop_oneof![Just("copy"), Just("paste"), Just("cut")],
        prop::option::of(prop_oneof![Just("editorFocus"), Just("a == \"//x\"")]),
        prop::option::of(0i64..3),
    )
        .prop_map(|(key, command, when, args)| {
            let mut record = BindingRecord::new(key, command);
            if let Some(when) = when {
                record = record.with_when(when);
            }
            if let Some(args) = args {
                record = record.with_args(serde_json::json!({ "n": args }));
            }
            record
        })
}

fn sources_strategy() -> impl Strategy<Value = Vec<Vec<BindingRecord>>> {
    prop::collection::vec(prop::collection::vec(binding_strategy(), 0..8), 0..5)
}

proptest! {
    #[test]
    fn prop_merged_identities_are_unique(sources in sources_strategy()) {
        let merged = KeybindMerger::merge_records(sources);
        let identities: HashSet<IdentityKey> = merged.iter().map(BindingRecord::identity).collect();
        prop_assert_eq!(identities.len(), merged.len());
    }

    #[test]
    fn prop_every_input_identity_survives(sources in sources_strategy()) {
        let expected: HashSet<IdentityKey> = sources
            .iter()
            .flatten()
            .map(BindingRecord::identity)
            .collect();
        let merged = KeybindMerger::merge_records(sources);
        let actual: HashSet<IdentityKey> = merged.iter().map(BindingRecord::identity).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_first_occurrence_wins(sources in sources_strategy()) {
        let merged = KeybindMerger::merge_records(sources.clone());
        for record in &merged {
            let first = sources
                .iter()
                .flatten()
                .find(|r| r.identity() == record.identity())
                .unwrap();
            prop_assert_eq!(record, first);
        }
    }

    #[test]
    fn prop_rendered_output_remerges_unchanged(sources in sources_strategy()) {
        let merged = KeybindMerger::merge_records(sources);
        let rendered = render_keybindings(&merged).unwrap();

        let read = read_text(Path::new("keybindings.json"), &rendered);
        prop_assert!(read.warning.is_none());
        prop_assert_eq!(read.rejected, 0);

        let remerged = KeybindMerger::merge_records(vec![read.records]);
        prop_assert_eq!(render_keybindings(&remerged).unwrap(), rendered);
    }
}
