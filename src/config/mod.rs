//! User configuration stored as TOML.
//!
//! The configuration only supplies defaults for the command line: where the
//! manifest store lives, which collection options `nlab collect` starts from,
//! and when hashing switches to memory maps. It never changes how collection
//! or diffing behave.

pub mod parser;
pub mod validator;

use crate::utils::expand_tilde;
use crate::utils::hash::DEFAULT_MMAP_THRESHOLD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default manifest store location, before `~` expansion.
pub const DEFAULT_STORE_PATH: &str = "~/.neurolab/data/manifests";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    /// Defaults for `nlab collect`.
    #[serde(default)]
    pub collect: CollectConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Manifest store directory; `~/` is expanded when resolved.
    #[serde(default = "default_store_path")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectConfig {
    #[serde(default = "default_true")]
    pub compute_hash: bool,
    #[serde(default = "default_true")]
    pub recursive: bool,
    /// Used when no `--include` is given on the command line.
    #[serde(default)]
    pub include_globs: Vec<String>,
    /// Always appended to `--exclude` patterns.
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_mmap_threshold")]
    pub mmap_threshold: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            compute_hash: true,
            recursive: true,
            include_globs: Vec::new(),
            exclude_globs: Vec::new(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// A default configuration is written when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - The configuration fails validation
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolved manifest store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `~` cannot be expanded.
    pub fn store_dir(&self) -> Result<PathBuf> {
        expand_tilde(&self.store.path)
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let (section, field) = key.split_once('.')?;

        match (section, field) {
            ("store", "path") => Some(self.store.path.clone()),
            ("collect", "compute_hash") => Some(self.collect.compute_hash.to_string()),
            ("collect", "recursive") => Some(self.collect.recursive.to_string()),
            ("collect", "include_globs") => Some(self.collect.include_globs.join(",")),
            ("collect", "exclude_globs") => Some(self.collect.exclude_globs.join(",")),
            ("performance", "mmap_threshold") => Some(self.performance.mmap_threshold.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Glob lists are given comma-separated; an empty value clears the list.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let Some((section, field)) = key.split_once('.') else {
            anyhow::bail!("Invalid configuration key: {key}");
        };

        let mut updated = self.clone();

        match (section, field) {
            ("store", "path") => {
                if value.trim().is_empty() {
                    anyhow::bail!("store.path cannot be empty");
                }
                updated.store.path = value.to_string();
            }
            ("collect", "compute_hash") => {
                updated.collect.compute_hash = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {value}"))?;
            }
            ("collect", "recursive") => {
                updated.collect.recursive = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {value}"))?;
            }
            ("collect", "include_globs") => updated.collect.include_globs = split_list(value),
            ("collect", "exclude_globs") => updated.collect.exclude_globs = split_list(value),
            ("performance", "mmap_threshold") => {
                updated.performance.mmap_threshold = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        }

        parser::validate_config(&updated)?;
        *self = updated;
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// Default functions for serde
fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_mmap_threshold() -> u64 {
    DEFAULT_MMAP_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_writes_default_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(&path)?;
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let text = std::fs::read_to_string(&path)?;
        assert!(text.contains("[store]"));
        assert!(text.contains("mmap_threshold = 1048576"));
        Ok(())
    }

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.store.path = "/srv/manifests".into();
        config.collect.exclude_globs = vec!["**/*.tmp".into()];
        config.save(&path)?;

        assert_eq!(Config::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[collect]\ncompute_hash = false\n")?;

        let config = Config::load(&path)?;
        assert!(!config.collect.compute_hash);
        assert!(config.collect.recursive);
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.performance.mmap_threshold, DEFAULT_MMAP_THRESHOLD);
        Ok(())
    }

    #[test]
    fn test_get_set() -> Result<()> {
        let mut config = Config::default();
        config.set("collect.recursive", "false")?;
        config.set("collect.exclude_globs", "*.tmp, **/cache/**")?;
        config.set("performance.mmap_threshold", "4096")?;

        assert_eq!(config.get("collect.recursive").as_deref(), Some("false"));
        assert_eq!(
            config.collect.exclude_globs,
            vec!["*.tmp".to_string(), "**/cache/**".to_string()]
        );
        assert_eq!(config.get("performance.mmap_threshold").as_deref(), Some("4096"));

        config.set("collect.exclude_globs", "")?;
        assert!(config.collect.exclude_globs.is_empty());
        Ok(())
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("nosection", "x").is_err());
        assert!(config.set("store.color", "x").is_err());
        assert!(config.set("collect.recursive", "maybe").is_err());
        assert!(config.set("performance.mmap_threshold", "0").is_err());
        assert!(config.set("collect.include_globs", "[").is_err());
        assert_eq!(config, Config::default());
        assert!(config.get("store.color").is_none());
    }

    #[test]
    fn test_store_dir_expands_home() -> Result<()> {
        let config = Config::default();
        let dir = config.store_dir()?;
        assert!(dir.is_absolute());
        assert!(dir.ends_with(".neurolab/data/manifests"));
        Ok(())
    }
}
