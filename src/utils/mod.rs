//! Utility functions and helpers.
//!
//! - Path manipulation (tilde expansion, `/`-separated rendering)
//! - File size and age formatting for command output
//! - Content hashing ([`hash`])
//!
//! # Examples
//!
//! ```
//! use neurolab::utils::{expand_tilde, format_size};
//!
//! # fn main() -> anyhow::Result<()> {
//! // Expand tilde in paths
//! let path = expand_tilde("~/datasets")?;
//!
//! // Format file sizes
//! let size_str = format_size(1024 * 1024); // "1.00 MB"
//! # Ok(())
//! # }
//! ```

/// SHA-256 content hashing
pub mod hash;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Component, Path, PathBuf};

/// Expands a path starting with `~` to the user's home directory.
///
/// Paths without a leading `~` (and `~user` forms) are returned unchanged, as is
/// everything when no home directory can be determined.
///
/// # Errors
///
/// Returns an error if the path is empty.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if let Some(home) = dirs::home_dir() {
        if path == "~" {
            return Ok(home);
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return Ok(home.join(rest));
        }
    }
    Ok(PathBuf::from(path))
}

/// Renders a relative path with `/` separators regardless of platform.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Formats a file size in bytes into a human-readable string with appropriate units.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size.round() as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Formats how long ago `ts` was, at second granularity ("3h 12m 5s ago").
#[must_use]
pub fn format_age(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *ts).num_seconds();
    if seconds <= 0 {
        return "just now".to_string();
    }
    let elapsed = std::time::Duration::from_secs(seconds.unsigned_abs());
    format!("{} ago", humantime::format_duration(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expand_tilde() -> Result<()> {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/datasets")?, home.join("datasets"));
            assert_eq!(expand_tilde("~")?, home);
        }
        assert_eq!(expand_tilde("/abs/path")?, PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("rel/path")?, PathBuf::from("rel/path"));
        assert!(expand_tilde("").is_err());
        Ok(())
    }

    #[test]
    fn test_to_slash() {
        let path: PathBuf = ["sub", "nested", "file.csv"].iter().collect();
        assert_eq!(to_slash(&path), "sub/nested/file.csv");
        assert_eq!(to_slash(Path::new("file.csv")), "file.csv");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(1536 * 1024 * 1024), "1.50 GB");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(&now, &now), "just now");
        assert_eq!(format_age(&(now - Duration::seconds(90)), &now), "1m 30s ago");
    }
}
