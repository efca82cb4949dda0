//! Include/exclude glob filtering.
//!
//! Relative patterns are anchored at the right end of a path: a pattern with
//! `n` components is tried against the last `n` components, the last `n + 1`,
//! and so on up to the whole path. That way `*.csv` matches a file at any depth
//! by name, `raw/*.csv` matches any `raw` directory, and `**/*.csv` behaves the
//! same as `*.csv`. Absolute patterns must match the whole absolute path.
//!
//! `*` never crosses a `/`; `**` spans any number of directories.

use crate::error::{Error, Result};
use crate::model::DataSourceSpec;
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude rules for one collection run.
#[derive(Debug, Clone, Default)]
pub struct GlobFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl GlobFilter {
    /// Compiles include and exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that does not compile.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Compiles the patterns carried by a source spec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that does not compile.
    pub fn from_spec(spec: &DataSourceSpec) -> Result<Self> {
        Self::new(spec.include_patterns(), spec.exclude_patterns())
    }

    /// `true` when the path survives both rule sets. Exclusion wins over inclusion.
    #[must_use]
    pub fn allows(&self, path: &Path) -> bool {
        !self.is_excluded(path) && self.is_included(path)
    }

    /// `true` if any exclude pattern matches; never with no exclude patterns.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        !self.exclude.is_empty() && matches_any(&self.exclude, path)
    }

    /// `true` if any include pattern matches; always with no include patterns.
    #[must_use]
    pub fn is_included(&self, path: &Path) -> bool {
        self.include.is_empty() || matches_any(&self.include, path)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|raw| {
            Pattern::new(raw).map_err(|e| Error::InvalidPattern {
                pattern: raw.clone(),
                message: e.msg.to_string(),
            })
        })
        .collect()
}

fn matches_any(patterns: &[Pattern], path: &Path) -> bool {
    let suffixes = trailing_suffixes(path);
    let full = path.to_string_lossy().replace('\\', "/");

    patterns.iter().any(|pattern| {
        if is_absolute_pattern(pattern.as_str()) {
            pattern.matches_with(&full, MATCH_OPTIONS)
        } else {
            suffixes
                .iter()
                .any(|candidate| pattern.matches_with(candidate, MATCH_OPTIONS))
        }
    })
}

fn is_absolute_pattern(pattern: &str) -> bool {
    pattern.starts_with('/') || Path::new(pattern).is_absolute()
}

/// `c`, `b/c`, `a/b/c` for the path `/a/b/c`.
fn trailing_suffixes(path: &Path) -> Vec<String> {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    (0..parts.len())
        .rev()
        .map(|start| parts[start..].join("/"))
        .collect()
}
