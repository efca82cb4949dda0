use crate::NeurolabContext;
use crate::collector::collect_source_with;
use crate::model::{DataSourceSpec, Manifest};
use crate::output;
use crate::storage::ManifestStore;
use crate::utils::format_size;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Flags of `nlab collect` that shape the source spec.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub no_hash: bool,
    pub no_recursive: bool,
    pub no_save: bool,
}

/// Builds the source spec for `path` from command-line flags and config defaults.
///
/// Command-line includes replace the configured ones; excludes from both are
/// combined. Hashing and recursion stay on only if neither side turns them off.
#[must_use]
pub fn build_spec(ctx: &NeurolabContext, path: &Path, opts: &CollectOptions) -> DataSourceSpec {
    let defaults = &ctx.config.collect;

    let include = if opts.include.is_empty() {
        defaults.include_globs.clone()
    } else {
        opts.include.clone()
    };
    let exclude: Vec<String> = opts
        .exclude
        .iter()
        .chain(&defaults.exclude_globs)
        .cloned()
        .collect();

    let mut spec = DataSourceSpec::new(path.to_string_lossy())
        .with_compute_hash(defaults.compute_hash && !opts.no_hash)
        .with_recursive(defaults.recursive && !opts.no_recursive);
    if !include.is_empty() {
        spec = spec.with_include(include);
    }
    if !exclude.is_empty() {
        spec = spec.with_exclude(exclude);
    }
    spec
}

/// Execute collect command: build a manifest for `path` and store it
///
/// # Errors
///
/// Returns an error if:
/// - A glob pattern is invalid
/// - The manifest cannot be saved
pub fn execute(ctx: &NeurolabContext, path: &Path, opts: &CollectOptions) -> Result<Manifest> {
    let spec = build_spec(ctx, path, opts);
    output::verbose(&format!("Collecting {}", spec.uri));

    let manifest = collect_source_with(&spec, ctx.collector_options())
        .with_context(|| format!("Failed to collect {}", path.display()))?;

    print_summary(&manifest);
    for warning in &manifest.warnings {
        output::warning(warning);
    }

    if opts.no_save {
        output::info("Manifest not saved (--no-save)");
    } else {
        ctx.store()?.save(&manifest)?;
        output::success(&format!("Saved manifest {}", manifest.manifest_id));
    }

    Ok(manifest)
}

fn print_summary(manifest: &Manifest) {
    println!("{}", "Collection Summary".bold());
    println!("  {:<16} {}", "Source", manifest.source.uri);
    println!("  {:<16} {}", "Artifacts", manifest.artifact_count());
    println!(
        "  {:<16} {}",
        "Total size",
        format_size(manifest.total_size_bytes())
    );
    println!("  {:<16} {}", "Warnings", manifest.warnings.len());
    println!("  {:<16} {}", "Manifest", manifest.manifest_id.yellow());
}
