//! Deduplicating merge of keybinding fragments
//!
//! Sources are folded in order, records within a source in document order.
//! The first record with a given `(key, command, when)` identity wins and
//! every later duplicate is dropped, whatever its `args`. The fold is a
//! single stable pass, so the same sources always produce the same output.

use std::collections::HashSet;
use std::path::PathBuf;

use futures::future::join_all;
use tracing::{debug, info};

use crate::models::{BindingRecord, IdentityKey};
use crate::reader::{read_source, read_source_async, SourceRead, SourceWarning};

/// Result of merging keybinding sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    /// Deduplicated records in merge order
    pub records: Vec<BindingRecord>,
    /// Sources that were skipped, in source order
    pub warnings: Vec<SourceWarning>,
    /// Number of sources that were looked at
    pub sources_read: usize,
    /// Records dropped because an earlier record had the same identity
    pub duplicates_dropped: usize,
    /// Array elements dropped because they were not valid bindings
    pub invalid_dropped: usize,
}

impl MergeResult {
    /// File names of skipped sources, for user-facing summaries
    pub fn skipped_files(&self) -> Vec<String> {
        self.warnings.iter().map(SourceWarning::file_name).collect()
    }
}

/// Keybinding merger
pub struct KeybindMerger;

impl KeybindMerger {
    /// Read every source in order and merge their records
    pub fn merge(sources: &[PathBuf]) -> MergeResult {
        let reads: Vec<SourceRead> = sources.iter().map(|path| read_source(path)).collect();
        Self::merge_reads(reads)
    }

    /// Like [`merge`](Self::merge), but reads all sources concurrently
    ///
    /// Reads are folded in source order once they have all completed, so the
    /// result is identical to the sequential merge.
    pub async fn merge_concurrent(sources: &[PathBuf]) -> MergeResult {
        let reads = join_all(sources.iter().map(|path| read_source_async(path))).await;
        Self::merge_reads(reads)
    }

    /// Fold already-read sources
    pub fn merge_reads(reads: impl IntoIterator<Item = SourceRead>) -> MergeResult {
        let mut result = MergeResult::default();
        let mut seen: HashSet<IdentityKey> = HashSet::new();

        for read in reads {
            result.sources_read += 1;
            result.invalid_dropped += read.rejected;
            if let Some(warning) = read.warning {
                result.warnings.push(warning);
            }

            let before = result.records.len();
            let total = read.records.len();
            Self::fold_into(&mut result, &mut seen, read.records);
            debug!(
                "Merged {} of {} binding(s) from {}",
                result.records.len() - before,
                total,
                read.path.display()
            );
        }

        info!(
            "Merged {} binding(s) from {} source(s), {} duplicate(s) dropped",
            result.records.len(),
            result.sources_read,
            result.duplicates_dropped
        );
        result
    }

    /// Pure deduplicating fold over in-memory record lists
    pub fn merge_records<I>(lists: I) -> Vec<BindingRecord>
    where
        I: IntoIterator<Item = Vec<BindingRecord>>,
    {
        let mut result = MergeResult::default();
        let mut seen = HashSet::new();
        for records in lists {
            Self::fold_into(&mut result, &mut seen, records);
        }
        result.records
    }

    fn fold_into(
        result: &mut MergeResult,
        seen: &mut HashSet<IdentityKey>,
        records: Vec<BindingRecord>,
    ) {
        for record in records {
            if seen.insert(record.identity()) {
                result.records.push(record);
            } else {
                result.duplicates_dropped += 1;
            }
        }
    }
}
