use crate::NeurolabContext;
use crate::diff::{ManifestDiff, PathChange, diff_manifests};
use crate::output;
use crate::storage::ManifestStore;
use anyhow::{Context, Result};
use colored::Colorize;

/// Execute diff command: compare two stored manifests
///
/// Prints per-bucket counts, or every changed path with `detailed`.
///
/// # Errors
///
/// Returns an error if either manifest cannot be loaded.
pub fn execute(
    ctx: &NeurolabContext,
    old_id: &str,
    new_id: &str,
    detailed: bool,
) -> Result<ManifestDiff> {
    let store = ctx.store()?;
    let old = store
        .load(old_id)
        .with_context(|| format!("Failed to load manifest: {old_id}"))?;
    let new = store
        .load(new_id)
        .with_context(|| format!("Failed to load manifest: {new_id}"))?;

    if old.source.uri != new.source.uri {
        output::warning(&format!(
            "Comparing manifests of different sources: {} vs {}",
            old.source.uri, new.source.uri
        ));
    }

    let diff = diff_manifests(&old, &new);

    if diff.is_empty() {
        output::success("No differences");
        return Ok(diff);
    }

    if detailed {
        for change in diff.changes() {
            println!("{}", format_change(change));
        }
    }

    println!(
        "{} added, {} removed, {} modified",
        diff.added.len().to_string().green(),
        diff.removed.len().to_string().red(),
        diff.modified.len().to_string().yellow()
    );

    Ok(diff)
}

fn format_change(change: PathChange<'_>) -> String {
    let status = change.status_char().to_string();
    let status = match change {
        PathChange::Added(_) => status.green(),
        PathChange::Removed(_) => status.red(),
        PathChange::Modified(_) => status.yellow(),
    };
    format!("{status}  {}", change.path())
}
