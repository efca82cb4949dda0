//! Manifests: immutable snapshots of everything collected from one source.

use super::{Artifact, DataSourceSpec, timestamp};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered snapshot of all artifacts discovered from one source at one time.
///
/// Built once by a collector, persisted verbatim and loaded verbatim. Artifacts
/// are ordered by relative path with path-less artifacts first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Generated unique identifier, preserved across save/load.
    pub manifest_id: String,
    /// The spec that produced this snapshot.
    pub source: DataSourceSpec,
    /// Snapshot creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Collected artifacts in relative-path order.
    pub artifacts: Vec<Artifact>,
    /// Recoverable problems met during collection.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Manifest {
    /// Assembles a manifest with a fresh identifier and the current UTC time.
    ///
    /// `artifacts` must already be in manifest order.
    #[must_use]
    pub fn new(source: DataSourceSpec, artifacts: Vec<Artifact>, warnings: Vec<String>) -> Self {
        Self {
            manifest_id: Uuid::new_v4().to_string(),
            source,
            created_at: Utc::now(),
            artifacts,
            warnings,
        }
    }

    /// Number of artifacts in the snapshot.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Sum of known artifact sizes.
    #[must_use]
    pub fn total_size_bytes(&self) -> u64 {
        self.artifacts.iter().filter_map(|a| a.size_bytes).sum()
    }

    /// Looks up an artifact by relative path.
    #[must_use]
    pub fn artifact(&self, relative_path: &str) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.relative_path.as_deref() == Some(relative_path))
    }

    /// Encodes the manifest as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes and validates a JSON manifest document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidManifest`] when a required field is missing, a
    /// timestamp has no timezone, an enum value is unknown, or the text is not
    /// JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidManifest(e.to_string()))
    }

    /// Decodes and validates an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`Manifest::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidManifest(e.to_string()))
    }
}
