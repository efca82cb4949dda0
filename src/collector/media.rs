//! Extension to media type lookup.
//!
//! Deliberately small: common dataset formats only. Anything not listed yields
//! no media type rather than a guess.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

static MEDIA_BY_EXT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("csv", "text/csv"),
        ("tsv", "text/tab-separated-values"),
        ("json", "application/json"),
        ("jsonl", "application/x-ndjson"),
        ("parquet", "application/parquet"),
        ("feather", "application/vnd.apache.arrow.file"),
        ("arrow", "application/vnd.apache.arrow.file"),
        ("txt", "text/plain"),
        ("md", "text/markdown"),
        ("yaml", "application/x-yaml"),
        ("yml", "application/x-yaml"),
        ("sqlite", "application/x-sqlite3"),
        ("db", "application/x-sqlite3"),
        ("pkl", "application/octet-stream"),
        ("pickle", "application/octet-stream"),
        ("zip", "application/zip"),
        ("gz", "application/gzip"),
        ("tar", "application/x-tar"),
    ])
});

/// Media type for the path's final extension, compared case-insensitively.
#[must_use]
pub fn infer_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MEDIA_BY_EXT.get(ext.as_str()).copied()
}
