use crate::NeurolabContext;
use crate::output;
use anyhow::Result;
use colored::Colorize;

const KEYS: &[&str] = &[
    "store.path",
    "collect.compute_hash",
    "collect.recursive",
    "collect.include_globs",
    "collect.exclude_globs",
    "performance.mmap_threshold",
];

/// Execute config command: get, set, or list configuration values
///
/// # Errors
///
/// Returns an error if:
/// - The key is unknown
/// - The value is invalid for the key
/// - The configuration file cannot be written
pub fn execute(
    ctx: &mut NeurolabContext,
    key: Option<&str>,
    value: Option<&str>,
    list: bool,
) -> Result<()> {
    match (key, value) {
        (Some(key), Some(value)) => {
            ctx.config.set(key, value)?;
            ctx.config.save(&ctx.config_path)?;
            output::success(&format!("Set {key} = {value}"));
        }
        (Some(key), None) => match ctx.config.get(key) {
            Some(v) => println!("{v}"),
            None => anyhow::bail!("Unknown configuration key: {key}"),
        },
        (None, _) => {
            if !list {
                output::info(&format!("Config file: {}", ctx.config_path.display()));
            }
            for key in KEYS {
                let value = ctx.config.get(key).unwrap_or_default();
                println!("{} = {}", key.bold(), value);
            }
        }
    }
    Ok(())
}
