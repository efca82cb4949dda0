//! Source specifications: where and how to discover artifacts.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of data source a spec points at.
///
/// Only the local filesystem is recognized; every other value is rejected when
/// parsed or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A file or directory on the local filesystem.
    #[default]
    Filesystem,
}

impl SourceType {
    /// The wire name of this source type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filesystem => "filesystem",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "filesystem" => Ok(Self::Filesystem),
            other => Err(Error::InvalidSourceType(other.to_string())),
        }
    }
}

/// Configuration describing where and how to discover artifacts.
///
/// Absent or empty `include_globs` matches everything; absent or empty
/// `exclude_globs` excludes nothing. `hints` is carried verbatim and never
/// interpreted by the collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceSpec {
    /// Filesystem path of the source (`~/` is expanded at collection time).
    pub uri: String,

    /// Kind of source; defaults to `filesystem` when absent from a document.
    #[serde(default)]
    pub source_type: SourceType,

    /// Glob patterns a file must match at least one of.
    #[serde(default)]
    pub include_globs: Option<Vec<String>>,

    /// Glob patterns that remove a file when any of them matches.
    #[serde(default)]
    pub exclude_globs: Option<Vec<String>>,

    /// Descend into subdirectories instead of listing immediate children only.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Free-form discovery hints reserved for future collectors.
    #[serde(default)]
    pub hints: BTreeMap<String, Value>,

    /// Compute a SHA-256 content hash per file. Written only when disabled.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub compute_hash: bool,
}

impl DataSourceSpec {
    /// Creates a filesystem spec with default options.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            source_type: SourceType::Filesystem,
            include_globs: None,
            exclude_globs: None,
            recursive: true,
            hints: BTreeMap::new(),
            compute_hash: true,
        }
    }

    /// Creates a spec from a source type name, rejecting unknown types.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for an empty `uri` and
    /// [`Error::InvalidSourceType`] for an unrecognized type.
    pub fn with_source_type(uri: impl Into<String>, source_type: &str) -> Result<Self> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(Error::MissingField("uri"));
        }
        let source_type = source_type.parse()?;
        Ok(Self {
            source_type,
            ..Self::new(uri)
        })
    }

    /// Returns a copy with the given include patterns.
    #[must_use]
    pub fn with_include<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_globs: Some(patterns.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    /// Returns a copy with the given exclude patterns.
    #[must_use]
    pub fn with_exclude<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude_globs: Some(patterns.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    /// Returns a copy with hashing toggled.
    #[must_use]
    pub fn with_compute_hash(self, compute_hash: bool) -> Self {
        Self {
            compute_hash,
            ..self
        }
    }

    /// Returns a copy with recursion toggled.
    #[must_use]
    pub fn with_recursive(self, recursive: bool) -> Self {
        Self { recursive, ..self }
    }

    /// Returns a copy carrying an extra hint.
    #[must_use]
    pub fn with_hint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.hints.insert(key.into(), value);
        self
    }

    /// Include patterns as a slice, empty when absent.
    #[must_use]
    pub fn include_patterns(&self) -> &[String] {
        self.include_globs.as_deref().unwrap_or_default()
    }

    /// Exclude patterns as a slice, empty when absent.
    #[must_use]
    pub fn exclude_patterns(&self) -> &[String] {
        self.exclude_globs.as_deref().unwrap_or_default()
    }
}

const fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_true(value: &bool) -> bool {
    *value
}
