//! Path-keyed comparison of two manifests.
//!
//! Artifacts are matched by `relative_path`; artifacts without one take no part
//! in the comparison at all. For a path present on both sides the rule is
//! decided per pair:
//!
//! - both sides carry a content hash: modified iff the hashes differ
//! - otherwise: modified iff `size_bytes` or `mtime` differ
//!
//! A pair where only one side was hashed therefore falls back to metadata.

use crate::model::{Artifact, Manifest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{Level, debug, span};

/// Result of comparing an older manifest with a newer one.
///
/// Each list is sorted lexicographically. All three empty means no differences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDiff {
    /// Paths only in the newer manifest.
    pub added: Vec<String>,
    /// Paths only in the older manifest.
    pub removed: Vec<String>,
    /// Paths in both whose content or metadata changed.
    pub modified: Vec<String>,
}

/// A single classified path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathChange<'a> {
    /// Present only in the newer manifest.
    Added(&'a str),
    /// Present only in the older manifest.
    Removed(&'a str),
    /// Present in both and changed.
    Modified(&'a str),
}

impl<'a> PathChange<'a> {
    /// Returns the path associated with the change.
    #[must_use]
    pub const fn path(&self) -> &'a str {
        match *self {
            Self::Added(p) | Self::Removed(p) | Self::Modified(p) => p,
        }
    }

    /// Returns a single-character representation of the change.
    #[must_use]
    pub const fn status_char(&self) -> char {
        match self {
            Self::Added(_) => 'A',
            Self::Removed(_) => 'D',
            Self::Modified(_) => 'M',
        }
    }
}

impl ManifestDiff {
    /// `true` when the two manifests have no differences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of changed paths across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// All changes in path order, each tagged with its bucket.
    #[must_use]
    pub fn changes(&self) -> Vec<PathChange<'_>> {
        let mut changes: Vec<PathChange<'_>> = self
            .added
            .iter()
            .map(|p| PathChange::Added(p))
            .chain(self.removed.iter().map(|p| PathChange::Removed(p)))
            .chain(self.modified.iter().map(|p| PathChange::Modified(p)))
            .collect();
        changes.sort_by(|a, b| a.path().cmp(b.path()));
        changes
    }
}

/// Compares `old` against `new`.
///
/// Pure: no I/O, and the inputs are not modified.
#[must_use]
pub fn diff_manifests(old: &Manifest, new: &Manifest) -> ManifestDiff {
    let span = span!(
        Level::DEBUG,
        "diff",
        old = %old.manifest_id,
        new = %new.manifest_id
    );
    let _guard = span.enter();

    let old_index = index_by_path(old);
    let new_index = index_by_path(new);

    let mut diff = ManifestDiff::default();

    // BTreeMap iteration keeps every bucket sorted.
    for (path, new_artifact) in &new_index {
        match old_index.get(path) {
            Some(old_artifact) => {
                if is_modified(old_artifact, new_artifact) {
                    diff.modified.push((*path).to_string());
                }
            }
            None => diff.added.push((*path).to_string()),
        }
    }

    for path in old_index.keys() {
        if !new_index.contains_key(path) {
            diff.removed.push((*path).to_string());
        }
    }

    debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        modified = diff.modified.len(),
        "diff finished"
    );

    diff
}

/// Indexes artifacts by relative path, skipping those without one.
///
/// Manifests hold at most one artifact per path; should a document contain a
/// duplicate, the later artifact wins.
fn index_by_path(manifest: &Manifest) -> BTreeMap<&str, &Artifact> {
    manifest
        .artifacts
        .iter()
        .filter_map(|a| a.relative_path.as_deref().map(|p| (p, a)))
        .collect()
}

/// Per-pair change rule: hashes when both sides have one, metadata otherwise.
fn is_modified(old: &Artifact, new: &Artifact) -> bool {
    match (&old.content_hash, &new.content_hash) {
        (Some(old_hash), Some(new_hash)) => old_hash != new_hash,
        _ => old.size_bytes != new.size_bytes || old.mtime != new.mtime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactType, DataSourceSpec};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn artifact(path: Option<&str>, hash: Option<&str>, size: u64, mtime: i64) -> Artifact {
        Artifact {
            artifact_id: format!("id-{}", path.unwrap_or("none")),
            source_uri: "/data".into(),
            artifact_type: ArtifactType::File,
            relative_path: path.map(str::to_string),
            absolute_path: None,
            size_bytes: Some(size),
            mtime: Some(at(mtime)),
            content_hash: hash.map(str::to_string),
            media_type: None,
            tags: BTreeMap::new(),
        }
    }

    fn manifest(artifacts: Vec<Artifact>) -> Manifest {
        Manifest::new(DataSourceSpec::new("/data"), artifacts, Vec::new())
    }

    #[test]
    fn test_self_diff_is_empty() {
        let m = manifest(vec![
            artifact(Some("a.txt"), Some("h1"), 1, 10),
            artifact(Some("b.txt"), None, 2, 20),
        ]);
        let diff = diff_manifests(&m, &m);
        assert!(diff.is_empty());
        assert_eq!(diff.total(), 0);
    }

    #[test]
    fn test_hash_change_is_modified() {
        let old = manifest(vec![artifact(Some("x.txt"), Some("H1"), 5, 10)]);
        let new = manifest(vec![artifact(Some("x.txt"), Some("H2"), 5, 10)]);
        let diff = diff_manifests(&old, &new);
        assert_eq!(diff.modified, ["x.txt"]);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_equal_hashes_ignore_metadata() {
        let old = manifest(vec![artifact(Some("x.txt"), Some("H"), 5, 10)]);
        let new = manifest(vec![artifact(Some("x.txt"), Some("H"), 5, 99)]);
        assert!(diff_manifests(&old, &new).is_empty());
    }

    #[test]
    fn test_added_and_removed() {
        let old = manifest(vec![
            artifact(Some("gone.csv"), Some("h"), 1, 1),
            artifact(Some("kept.csv"), Some("h"), 1, 1),
        ]);
        let new = manifest(vec![
            artifact(Some("kept.csv"), Some("h"), 1, 1),
            artifact(Some("new.csv"), Some("h"), 1, 1),
        ]);
        let diff = diff_manifests(&old, &new);
        assert_eq!(diff.added, ["new.csv"]);
        assert_eq!(diff.removed, ["gone.csv"]);
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn test_metadata_fallback_when_hash_missing_on_one_side() {
        // Hash only on the old side: compare size and mtime instead.
        let old = manifest(vec![artifact(Some("x"), Some("H"), 5, 10)]);
        let same_meta = manifest(vec![artifact(Some("x"), None, 5, 10)]);
        assert!(diff_manifests(&old, &same_meta).is_empty());

        let bigger = manifest(vec![artifact(Some("x"), None, 6, 10)]);
        assert_eq!(diff_manifests(&old, &bigger).modified, ["x"]);

        let touched = manifest(vec![artifact(Some("x"), None, 5, 11)]);
        assert_eq!(diff_manifests(&touched, &old).modified, ["x"]);
    }

    #[test]
    fn test_pathless_artifacts_never_classified() {
        let old = manifest(vec![artifact(None, Some("H1"), 1, 1)]);
        let new = manifest(vec![artifact(None, Some("H2"), 2, 2)]);
        assert!(diff_manifests(&old, &new).is_empty());
        assert!(diff_manifests(&old, &manifest(Vec::new())).is_empty());
    }

    #[test]
    fn test_buckets_sorted() {
        let old = manifest(Vec::new());
        let new = manifest(vec![
            artifact(Some("b"), None, 1, 1),
            artifact(Some("a/z"), None, 1, 1),
            artifact(Some("a"), None, 1, 1),
        ]);
        assert_eq!(diff_manifests(&old, &new).added, ["a", "a/z", "b"]);
    }

    #[test]
    fn test_changes_view() {
        let diff = ManifestDiff {
            added: vec!["c".into()],
            removed: vec!["a".into()],
            modified: vec!["b".into()],
        };
        let rendered: Vec<(char, &str)> = diff
            .changes()
            .iter()
            .map(|c| (c.status_char(), c.path()))
            .collect();
        assert_eq!(rendered, [('D', "a"), ('M', "b"), ('A', "c")]);
    }
}
