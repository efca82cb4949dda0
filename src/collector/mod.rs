//! Artifact collection: turning a [`DataSourceSpec`] into a [`Manifest`].
//!
//! Each source type has one [`ArtifactCollector`] implementation.
//! [`collect_source`] routes a spec to the collector for its type; supporting a
//! new source type means adding a collector and a dispatch arm, the collector
//! contract itself stays the same.
//!
//! # Usage
//!
//! ```no_run
//! use neurolab::collector::collect_source;
//! use neurolab::model::DataSourceSpec;
//!
//! # fn main() -> neurolab::Result<()> {
//! let spec = DataSourceSpec::new("~/datasets/eeg").with_exclude(["**/*.tmp"]);
//! let manifest = collect_source(&spec)?;
//! println!("{} artifacts", manifest.artifact_count());
//! # Ok(())
//! # }
//! ```

pub mod filesystem;
pub mod filter;
pub mod media;

pub use filesystem::FilesystemCollector;
pub use filter::GlobFilter;
pub use media::infer_media_type;

use crate::error::{Error, Result};
use crate::model::{DataSourceSpec, Manifest, SourceType};
use crate::utils::hash::DEFAULT_MMAP_THRESHOLD;

/// A strategy that discovers artifacts for one kind of source.
///
/// Implementations hold no state between runs: every call to
/// [`ArtifactCollector::collect`] allocates fresh identifiers and warnings.
pub trait ArtifactCollector {
    /// Human-readable collector name used in error messages.
    fn name(&self) -> &'static str;

    /// The source type this collector implements.
    fn source_type(&self) -> SourceType;

    /// Discovers artifacts described by `source`.
    ///
    /// # Errors
    ///
    /// Fails only on configuration errors (wrong source type, invalid globs).
    /// Per-entry problems are recorded as manifest warnings.
    fn collect(&self, source: &DataSourceSpec) -> Result<Manifest>;

    /// Rejects sources of a type this collector does not implement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSource`] on a type mismatch.
    fn ensure_supported(&self, source: &DataSourceSpec) -> Result<()> {
        if source.source_type == self.source_type() {
            Ok(())
        } else {
            Err(Error::UnsupportedSource {
                collector: self.name(),
                source_type: source.source_type.to_string(),
            })
        }
    }
}

/// Tuning knobs shared by all collectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorOptions {
    /// Files at or above this size are hashed through a memory map.
    pub mmap_threshold: u64,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

/// Returns the collector registered for `source_type`.
#[must_use]
pub fn collector_for(
    source_type: SourceType,
    options: CollectorOptions,
) -> Box<dyn ArtifactCollector> {
    match source_type {
        SourceType::Filesystem => Box::new(FilesystemCollector::with_mmap_threshold(
            options.mmap_threshold,
        )),
    }
}

/// Collects `source` with default options.
///
/// # Errors
///
/// See [`ArtifactCollector::collect`].
pub fn collect_source(source: &DataSourceSpec) -> Result<Manifest> {
    collect_source_with(source, CollectorOptions::default())
}

/// Collects `source` using the collector registered for its type.
///
/// # Errors
///
/// See [`ArtifactCollector::collect`].
pub fn collect_source_with(source: &DataSourceSpec, options: CollectorOptions) -> Result<Manifest> {
    collector_for(source.source_type, options).collect(source)
}
