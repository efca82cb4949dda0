use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Finds configuration keys that nlab does not recognise.
///
/// Unknown keys are ignored by the loader, so a typo such as `exlude_globs`
/// would otherwise go unnoticed.
pub struct ConfigValidator {
    known_fields: HashSet<&'static str>,
}

const KNOWN_FIELDS: &[&str] = &[
    "store.path",
    "collect.compute_hash",
    "collect.recursive",
    "collect.include_globs",
    "collect.exclude_globs",
    "performance.mmap_threshold",
];

const KNOWN_SECTIONS: &[&str] = &["store", "collect", "performance"];

impl ConfigValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            known_fields: KNOWN_FIELDS.iter().copied().collect(),
        }
    }

    /// Returns the dotted names of unknown keys in `config_path`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn unknown_fields(&self, config_path: &Path) -> Result<Vec<String>> {
        if !config_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(config_path)?;
        let parsed: toml::Table = toml::from_str(&content)?;

        let mut unknown = Vec::new();
        for (section, value) in &parsed {
            match value {
                toml::Value::Table(fields) if KNOWN_SECTIONS.contains(&section.as_str()) => {
                    for key in fields.keys() {
                        let full_key = format!("{section}.{key}");
                        if !self.known_fields.contains(full_key.as_str()) {
                            unknown.push(full_key);
                        }
                    }
                }
                _ => unknown.push(section.clone()),
            }
        }

        unknown.sort();
        Ok(unknown)
    }

    /// Prints a warning block for unknown keys to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        let unknown = self.unknown_fields(config_path)?;
        if unknown.is_empty() {
            return Ok(());
        }

        tracing::warn!(fields = ?unknown, "unknown configuration fields");
        eprintln!("{}", "Configuration warnings:".yellow().bold());
        for field in &unknown {
            eprintln!("  Unknown configuration field: {}", field.yellow());
        }
        eprintln!();

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_fields_pass() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        crate::config::Config::default().save(&path)?;

        assert!(ConfigValidator::new().unknown_fields(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_fields_reported() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[collect]\nexlude_globs = []\nrecursive = true\n\n[remote]\nurl = \"x\"\n",
        )?;

        let unknown = ConfigValidator::new().unknown_fields(&path)?;
        assert_eq!(unknown, vec!["collect.exlude_globs", "remote"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_clean() -> Result<()> {
        let dir = TempDir::new()?;
        let unknown = ConfigValidator::new().unknown_fields(&dir.path().join("absent.toml"))?;
        assert!(unknown.is_empty());
        Ok(())
    }
}
