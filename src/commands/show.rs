use crate::NeurolabContext;
use crate::model::{Artifact, Manifest, timestamp};
use crate::storage::ManifestStore;
use crate::utils::format_size;
use anyhow::{Context, Result};
use colored::Colorize;

/// Execute show command: print one stored manifest
///
/// # Errors
///
/// Returns an error if:
/// - The manifest ID is unknown
/// - The stored document is invalid
pub fn execute(ctx: &NeurolabContext, id: &str, json: bool) -> Result<()> {
    let manifest = ctx
        .store()?
        .load(id)
        .with_context(|| format!("Failed to load manifest: {id}"))?;

    if json {
        println!("{}", manifest.to_json()?);
    } else {
        print!("{}", render(&manifest));
    }
    Ok(())
}

/// Human-readable header plus one line per artifact.
#[must_use]
pub fn render(manifest: &Manifest) -> String {
    let mut out = String::new();
    let source = &manifest.source;

    out.push_str(&format!("{} {}\n", "manifest".yellow(), manifest.manifest_id));
    out.push_str(&format!("{:<10} {}\n", "Source:".bold(), source.uri));
    out.push_str(&format!(
        "{:<10} {}\n",
        "Created:".bold(),
        timestamp::format(&manifest.created_at)
    ));
    out.push_str(&format!(
        "{:<10} hash={} recursive={}\n",
        "Options:".bold(),
        source.compute_hash,
        source.recursive
    ));
    if !source.include_patterns().is_empty() {
        out.push_str(&format!(
            "{:<10} {}\n",
            "Include:".bold(),
            source.include_patterns().join(", ")
        ));
    }
    if !source.exclude_patterns().is_empty() {
        out.push_str(&format!(
            "{:<10} {}\n",
            "Exclude:".bold(),
            source.exclude_patterns().join(", ")
        ));
    }
    out.push_str(&format!(
        "{:<10} {} ({})\n\n",
        "Artifacts:".bold(),
        manifest.artifact_count(),
        format_size(manifest.total_size_bytes())
    ));

    for artifact in &manifest.artifacts {
        out.push_str(&artifact_line(artifact));
        out.push('\n');
    }

    if !manifest.warnings.is_empty() {
        out.push_str(&format!("\n{}\n", "Warnings:".yellow().bold()));
        for warning in &manifest.warnings {
            out.push_str(&format!("  {warning}\n"));
        }
    }

    out
}

fn artifact_line(artifact: &Artifact) -> String {
    let hash = artifact
        .content_hash
        .as_deref()
        .map_or("-", |h| h.get(..12).unwrap_or(h));
    let size = artifact.size_bytes.map_or_else(|| "-".to_string(), format_size);
    let path = artifact
        .relative_path
        .as_deref()
        .or(artifact.absolute_path.as_deref())
        .unwrap_or("-");

    format!(
        "  {}  {:>10}  {:<24}  {}",
        hash.dimmed(),
        size,
        artifact.media_type.as_deref().unwrap_or("-"),
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{artifact, context, manifest};

    #[test]
    fn test_render_lists_artifacts() {
        let mut m = manifest(vec![
            artifact("a.csv", Some("0123456789abcdef0123"), 2048),
            artifact("sub/b.txt", None, 5),
        ]);
        m.warnings.push("stat failed for /data/x: denied".into());

        let text = render(&m);
        assert!(text.contains(&m.manifest_id));
        assert!(text.contains("2 (2.00 KB)"));
        assert!(text.contains("0123456789ab"));
        assert!(text.contains("sub/b.txt"));
        assert!(text.contains("stat failed for /data/x"));
    }

    #[test]
    fn test_unknown_id_is_error() -> Result<()> {
        let (_dir, ctx) = context()?;
        let err = execute(&ctx, "nope", false).unwrap_err();
        assert!(err.to_string().contains("nope"));
        Ok(())
    }
}
