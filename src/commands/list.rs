use crate::NeurolabContext;
use crate::output;
use crate::utils::format_age;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

/// Execute list command: print stored manifests, oldest first
///
/// # Errors
///
/// Returns an error if the store cannot be read or a stored manifest is invalid.
pub fn execute(ctx: &NeurolabContext) -> Result<()> {
    let manifests = ctx.store()?.load_all()?;

    if manifests.is_empty() {
        output::info("No manifests stored");
        return Ok(());
    }

    let now = Utc::now();
    for manifest in &manifests {
        println!(
            "{}  {:>16}  {:>6} artifacts  {}",
            manifest.manifest_id.yellow(),
            format_age(&manifest.created_at, &now).dimmed(),
            manifest.artifact_count(),
            manifest.source.uri
        );
    }

    output::info(&format!("{} manifest(s)", manifests.len()));
    Ok(())
}
