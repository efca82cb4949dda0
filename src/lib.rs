#![warn(missing_docs)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::arithmetic_side_effects)] // Simple counters and size sums cannot overflow
#![allow(clippy::float_arithmetic)] // Required for file size formatting

//! # Neurolab - Data Source Manifests
//!
//! Neurolab catalogues the files that make up a data source into a
//! [`Manifest`]: one [`Artifact`] per file with its size, modification time,
//! media type and SHA-256 content hash. Manifests are plain JSON, can be
//! stored by ID, and two manifests of the same source can be diffed to see
//! what was added, removed or modified in between.
//!
//! ## Architecture
//!
//! - [`model`]: source specs, artifacts, manifests and their JSON format
//! - [`collector`]: filesystem walk, glob filtering, hashing, media types
//! - [`diff`]: path-keyed comparison of two manifests
//! - [`storage`]: manifest persistence keyed by ID
//! - [`config`]: TOML configuration for the command line
//! - [`commands`]: command implementations behind the `nlab` binary
//! - [`output`]: verbosity-aware terminal messages
//! - [`utils`]: hashing and formatting helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use neurolab::{DataSourceSpec, collect_source, diff_manifests};
//!
//! # fn main() -> neurolab::Result<()> {
//! let spec = DataSourceSpec::new("/data/eeg").with_include(["**/*.edf"]);
//! let before = collect_source(&spec)?;
//! // ... files change ...
//! let after = collect_source(&spec)?;
//!
//! let diff = diff_manifests(&before, &after);
//! println!("{} added, {} modified", diff.added.len(), diff.modified.len());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Artifact collection for each source type.
pub mod collector;

/// Command implementations for the `nlab` binary.
pub mod commands;

/// Configuration parsing and validation.
pub mod config;

/// Manifest comparison.
pub mod diff;

/// Library error type.
pub mod error;

/// Source specs, artifacts and manifests.
pub mod model;

/// Output formatting for the command line.
pub mod output;

/// Manifest persistence.
pub mod storage;

/// Utility functions and helpers.
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use collector::{collect_source, collect_source_with};
pub use diff::{ManifestDiff, diff_manifests};
pub use error::{Error, Result};
pub use model::{Artifact, ArtifactType, DataSourceSpec, Manifest, SourceType};

use anyhow::Context;
use std::path::PathBuf;

/// Current version of the nlab binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/neurolab/config.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "NEUROLAB_CONFIG_PATH";

/// Environment variable overriding the manifest store directory.
pub const STORE_PATH_ENV: &str = "NEUROLAB_STORE_PATH";

/// Central context for all nlab commands.
///
/// Holds the resolved configuration and the manifest store directory.
///
/// # Examples
///
/// ```no_run
/// use neurolab::NeurolabContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Context from the default paths and environment overrides
/// let ctx = NeurolabContext::new()?;
///
/// // Context with explicit paths (for testing)
/// let ctx = NeurolabContext::new_explicit(
///     "/tmp/test_store".into(),
///     "/tmp/test_config.toml".into(),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NeurolabContext {
    /// Directory holding stored manifests.
    pub store_path: PathBuf,

    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl NeurolabContext {
    /// Creates a context from the default config path, honouring
    /// `NEUROLAB_CONFIG_PATH` and `NEUROLAB_STORE_PATH`.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the
    /// configuration file cannot be read, created or validated.
    pub fn new() -> anyhow::Result<Self> {
        let config_path = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;

        let store_path = if let Ok(path) = std::env::var(STORE_PATH_ENV) {
            utils::expand_tilde(&path)?
        } else {
            config.store_dir()?
        };

        let validator = config::validator::ConfigValidator::new();
        if let Err(e) = validator.validate_config_file(&config_path) {
            output::warning(&format!("Configuration validation failed: {e}"));
        }

        Ok(Self {
            store_path,
            config_path,
            config,
        })
    }

    /// Creates a context with explicit paths, ignoring the environment.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(store_path: PathBuf, config_path: PathBuf) -> anyhow::Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            store_path,
            config_path,
            config,
        })
    }

    /// Opens the manifest store, creating its directory if needed.
    ///
    /// # Errors
    /// Returns an error if the store directory cannot be created.
    pub fn store(&self) -> anyhow::Result<storage::FileManifestStore> {
        storage::FileManifestStore::new(&self.store_path).with_context(|| {
            format!(
                "Failed to open manifest store: {}",
                self.store_path.display()
            )
        })
    }

    /// Collector tuning taken from the configuration.
    #[must_use]
    pub const fn collector_options(&self) -> collector::CollectorOptions {
        collector::CollectorOptions {
            mmap_threshold: self.config.performance.mmap_threshold,
        }
    }
}
