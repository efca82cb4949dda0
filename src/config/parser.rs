use super::Config;
use crate::collector::GlobFilter;
use anyhow::{Context, Result};
use std::path::Path;

pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects configurations that would make every collection fail.
///
/// # Errors
///
/// Returns an error for a zero mmap threshold, an empty store path, or a
/// glob that does not compile.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.performance.mmap_threshold == 0 {
        anyhow::bail!("performance.mmap_threshold must be at least 1");
    }

    if config.store.path.trim().is_empty() {
        anyhow::bail!("store.path cannot be empty");
    }

    GlobFilter::new(&config.collect.include_globs, &config.collect.exclude_globs)
        .context("Invalid glob in [collect]")?;

    Ok(())
}
