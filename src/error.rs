//! Error taxonomy for the library layer.
//!
//! Configuration problems (bad source type, bad glob) fail fast and abort the
//! operation. Per-entry filesystem problems during collection never surface
//! here: they become warning strings on the resulting [`crate::Manifest`].

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by collection, decoding and manifest storage.
#[derive(Debug, Error)]
pub enum Error {
    /// A source type string that no collector recognizes.
    #[error("invalid source_type: {0}")]
    InvalidSourceType(String),

    /// A collector was handed a source of a type it does not implement.
    #[error("{collector} cannot handle source_type={source_type}")]
    UnsupportedSource {
        /// Name of the collector that rejected the source.
        collector: &'static str,
        /// The offending source type.
        source_type: String,
    },

    /// An include or exclude glob that failed to compile.
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern as written by the user.
        pattern: String,
        /// Compiler message from the glob parser.
        message: String,
    },

    /// A required field was missing while building a value.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A stored manifest document that does not satisfy the format contract.
    #[error("invalid manifest document: {0}")]
    InvalidManifest(String),

    /// A manifest ID unknown to the store.
    #[error("manifest {0} not found")]
    NotFound(String),

    /// Filesystem failure while reading or writing the store.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failure encoding a manifest to JSON.
    #[error("failed to encode manifest: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` for the storage not-found kind.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` for errors caused by invalid user configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidSourceType(_)
                | Self::UnsupportedSource { .. }
                | Self::InvalidPattern { .. }
                | Self::MissingField(_)
        )
    }

    /// Wraps an I/O error together with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
