use crate::NeurolabContext;
use crate::output;
use crate::storage::ManifestStore;
use anyhow::{Context, Result};

/// Execute delete command: remove one stored manifest
///
/// # Errors
///
/// Returns an error if the manifest ID is unknown or the file cannot be removed.
pub fn execute(ctx: &NeurolabContext, id: &str) -> Result<()> {
    ctx.store()?
        .delete(id)
        .with_context(|| format!("Failed to delete manifest: {id}"))?;
    output::success(&format!("Deleted manifest {id}"));
    Ok(())
}

/// Execute clear command: remove every stored manifest
///
/// Without `force` nothing is deleted; the count of manifests that would be
/// removed is reported instead. Returns the number of manifests deleted.
///
/// # Errors
///
/// Returns an error if the store cannot be read or a manifest cannot be removed.
pub fn clear(ctx: &NeurolabContext, force: bool) -> Result<usize> {
    let store = ctx.store()?;

    if !force {
        let count = store.list()?.len();
        output::warning(&format!(
            "{count} manifest(s) would be deleted; rerun with --force to delete them"
        ));
        return Ok(0);
    }

    let removed = store.clear()?;
    output::success(&format!("Deleted {removed} manifest(s)"));
    Ok(removed)
}
