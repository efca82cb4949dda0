use crate::NeurolabContext;
use crate::model::{Artifact, ArtifactType, DataSourceSpec, Manifest};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;
use tempfile::TempDir;

/// A context whose store and config file live in a fresh temporary directory.
pub fn context() -> Result<(TempDir, NeurolabContext)> {
    let temp_dir = tempfile::tempdir()?;
    let ctx = NeurolabContext::new_explicit(
        temp_dir.path().join("manifests"),
        temp_dir.path().join("config.toml"),
    )?;
    Ok((temp_dir, ctx))
}

/// A file artifact with fixed metadata, for building manifests by hand.
pub fn artifact(path: &str, hash: Option<&str>, size: u64) -> Artifact {
    Artifact {
        artifact_id: format!("artifact-{path}"),
        source_uri: "/data".to_string(),
        artifact_type: ArtifactType::File,
        relative_path: Some(path.to_string()),
        absolute_path: Some(format!("/data/{path}")),
        size_bytes: Some(size),
        mtime: Utc.timestamp_opt(1_700_000_000, 0).single(),
        content_hash: hash.map(str::to_string),
        media_type: None,
        tags: BTreeMap::new(),
    }
}

pub fn manifest(artifacts: Vec<Artifact>) -> Manifest {
    Manifest::new(DataSourceSpec::new("/data"), artifacts, Vec::new())
}
