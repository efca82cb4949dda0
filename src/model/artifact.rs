//! A single discovered artifact and its metadata.

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of artifact recorded in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    /// A regular file. The only kind the filesystem collector produces.
    File,
    /// A database table. Accepted when decoding, never produced locally.
    DbTable,
}

/// Immutable record of one discovered file at a point in time.
///
/// Diffing keys on `relative_path` only. Artifacts collected from a single-file
/// source have no relative path and therefore no diff identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Generated unique identifier.
    pub artifact_id: String,
    /// The `uri` of the spec this artifact was collected from.
    pub source_uri: String,
    /// Kind of artifact.
    pub artifact_type: ArtifactType,
    /// Path relative to the source root, `/`-separated.
    #[serde(default)]
    pub relative_path: Option<String>,
    /// Fully resolved path on disk.
    #[serde(default)]
    pub absolute_path: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size_bytes: Option<u64>,
    /// Last modification time, always UTC.
    #[serde(default, with = "timestamp::option")]
    pub mtime: Option<DateTime<Utc>>,
    /// Hex-encoded SHA-256 of the content, when hashing was requested and succeeded.
    #[serde(default)]
    pub content_hash: Option<String>,
    /// Media type inferred from the file extension.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Free-form labels; never interpreted by collection or diffing.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Artifact {
    /// Sort key used for manifest ordering: artifacts without a relative path first.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.relative_path.as_deref().unwrap_or("")
    }
}
