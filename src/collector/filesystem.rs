//! Collector for local files and directory trees.
//!
//! A run never fails because of a single bad entry. Unreadable directory
//! entries and failed `stat` calls drop the file and record a warning; a failed
//! content read keeps the file without a hash and records a warning. A missing
//! root yields an empty manifest with one warning.

use super::ArtifactCollector;
use super::filter::GlobFilter;
use super::media::infer_media_type;
use crate::error::{Error, Result};
use crate::model::{Artifact, ArtifactType, DataSourceSpec, Manifest, SourceType};
use crate::utils::hash::{DEFAULT_MMAP_THRESHOLD, hash_file};
use crate::utils::{expand_tilde, to_slash};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{Level, debug, span, trace, warn};
use uuid::Uuid;
use walkdir::WalkDir;

/// Collects artifacts from a file or directory on the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct FilesystemCollector {
    /// Files at or above this size are hashed through a memory map.
    mmap_threshold: u64,
}

impl FilesystemCollector {
    /// Creates a collector with the default hashing strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }

    /// Creates a collector that memory-maps files of at least `threshold` bytes.
    #[must_use]
    pub const fn with_mmap_threshold(threshold: u64) -> Self {
        Self {
            mmap_threshold: threshold,
        }
    }
}

impl Default for FilesystemCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactCollector for FilesystemCollector {
    fn name(&self) -> &'static str {
        "FilesystemCollector"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Filesystem
    }

    fn collect(&self, source: &DataSourceSpec) -> Result<Manifest> {
        self.ensure_supported(source)?;

        let span = span!(
            Level::DEBUG,
            "collect",
            uri = %source.uri,
            recursive = source.recursive,
            compute_hash = source.compute_hash
        );
        let _guard = span.enter();

        // Bad patterns abort before any filesystem access.
        let filter = GlobFilter::from_spec(source)?;
        let root = expand_tilde(&source.uri).map_err(|_| Error::MissingField("uri"))?;

        let mut run = CollectionRun {
            source,
            filter,
            mmap_threshold: self.mmap_threshold,
            artifacts: Vec::new(),
            warnings: Vec::new(),
        };

        if root.is_file() {
            run.try_add_file(&root, None);
        } else if root.is_dir() {
            run.walk_directory(&root);
        } else {
            run.warn(format!(
                "source uri does not exist or is not accessible: {}",
                root.display()
            ));
        }

        let CollectionRun {
            mut artifacts,
            warnings,
            ..
        } = run;
        artifacts.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));

        debug!(
            artifacts = artifacts.len(),
            warnings = warnings.len(),
            "collection finished"
        );

        Ok(Manifest::new(source.clone(), artifacts, warnings))
    }
}

/// State of a single collection run. Nothing here outlives the run.
struct CollectionRun<'a> {
    source: &'a DataSourceSpec,
    filter: GlobFilter,
    mmap_threshold: u64,
    artifacts: Vec<Artifact>,
    warnings: Vec<String>,
}

impl CollectionRun<'_> {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    fn walk_directory(&mut self, root: &Path) {
        let max_depth = if self.source.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let location = e
                        .path()
                        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    self.warn(format!(
                        "failed to inspect path {}: {e}",
                        location.display()
                    ));
                    continue;
                }
            };

            let file_type = entry.file_type();
            let is_regular_file =
                file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
            if is_regular_file {
                self.try_add_file(entry.path(), Some(root));
            }
        }
    }

    /// Applies the filter and records one artifact for `path`.
    ///
    /// `base_root` is the directory root for relative paths; `None` for a
    /// single-file source.
    fn try_add_file(&mut self, path: &Path, base_root: Option<&Path>) {
        if !self.filter.allows(path) {
            trace!(path = %path.display(), "filtered out");
            return;
        }

        let (size_bytes, mtime) = match stat(path) {
            Ok(meta) => meta,
            Err(e) => {
                self.warn(format!("stat failed for {}: {e}", path.display()));
                return;
            }
        };

        let content_hash = if self.source.compute_hash {
            match hash_file(path, self.mmap_threshold) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    self.warn(format!("hash failed for {}: {e}", path.display()));
                    None
                }
            }
        } else {
            None
        };

        let absolute_path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let relative_path = base_root.map(|root| relative_to(path, root));

        self.artifacts.push(Artifact {
            artifact_id: Uuid::new_v4().to_string(),
            source_uri: self.source.uri.clone(),
            artifact_type: ArtifactType::File,
            relative_path,
            absolute_path: Some(absolute_path.to_string_lossy().into_owned()),
            size_bytes: Some(size_bytes),
            mtime: Some(mtime),
            content_hash,
            media_type: infer_media_type(path).map(str::to_string),
            tags: BTreeMap::new(),
        });
    }
}

fn stat(path: &Path) -> std::io::Result<(u64, DateTime<Utc>)> {
    let metadata = fs::metadata(path)?;
    let modified = metadata.modified()?;
    Ok((metadata.len(), DateTime::<Utc>::from(modified)))
}

/// Relative path of a walked entry, falling back to the file name.
fn relative_to(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).map_or_else(
        |_| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        },
        to_slash,
    )
}
