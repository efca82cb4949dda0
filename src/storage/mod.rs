//! Manifest persistence.
//!
//! A [`ManifestStore`] is a key-value store keyed by manifest ID. The only
//! implementation, [`FileManifestStore`], keeps one pretty-printed JSON
//! document per manifest in a directory:
//!
//! ```text
//! ~/.neurolab/data/manifests/
//!   3f0c...e1.json
//!   9b2a...4d.json
//! ```

use crate::error::{Error, Result};
use crate::model::Manifest;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of stored manifest documents.
pub const MANIFEST_EXTENSION: &str = "json";

/// Storage for manifests keyed by their generated ID.
pub trait ManifestStore {
    /// Stores `manifest`, overwriting any manifest with the same ID.
    ///
    /// # Errors
    ///
    /// Fails on encode or I/O errors.
    fn save(&self, manifest: &Manifest) -> Result<()>;

    /// Loads the manifest stored under `manifest_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown ID and
    /// [`Error::InvalidManifest`] for a document that fails validation.
    fn load(&self, manifest_id: &str) -> Result<Manifest>;

    /// IDs of every stored manifest, in no particular order.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be enumerated.
    fn list(&self) -> Result<Vec<String>>;

    /// Removes the manifest stored under `manifest_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown ID.
    fn delete(&self, manifest_id: &str) -> Result<()>;
}

/// Directory-backed store holding one `<id>.json` file per manifest.
#[derive(Debug, Clone)]
pub struct FileManifestStore {
    base_dir: PathBuf,
}

impl FileManifestStore {
    /// Opens a store rooted at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| Error::io(&base_dir, e))?;
        Ok(Self { base_dir })
    }

    /// Directory holding the manifest documents.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Deletes every stored manifest and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Fails on the first manifest that cannot be removed.
    pub fn clear(&self) -> Result<usize> {
        let ids = self.list()?;
        for id in &ids {
            self.delete(id)?;
        }
        Ok(ids.len())
    }

    /// Loads every stored manifest, oldest first.
    ///
    /// # Errors
    ///
    /// Fails on the first document that cannot be loaded.
    pub fn load_all(&self) -> Result<Vec<Manifest>> {
        let mut manifests = self
            .list()?
            .iter()
            .map(|id| self.load(id))
            .collect::<Result<Vec<_>>>()?;
        manifests.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.manifest_id.cmp(&b.manifest_id))
        });
        Ok(manifests)
    }

    /// Path of the document for `manifest_id`, or `None` for an ID that could
    /// escape the store directory.
    fn path_for(&self, manifest_id: &str) -> Option<PathBuf> {
        let valid = !manifest_id.is_empty()
            && manifest_id != "."
            && manifest_id != ".."
            && !manifest_id.contains(['/', '\\']);
        valid.then(|| {
            self.base_dir
                .join(format!("{manifest_id}.{MANIFEST_EXTENSION}"))
        })
    }

    fn existing_path(&self, manifest_id: &str) -> Result<PathBuf> {
        self.path_for(manifest_id)
            .filter(|p| p.is_file())
            .ok_or_else(|| Error::NotFound(manifest_id.to_string()))
    }
}

impl ManifestStore for FileManifestStore {
    fn save(&self, manifest: &Manifest) -> Result<()> {
        let path = self.path_for(&manifest.manifest_id).ok_or_else(|| {
            Error::InvalidManifest(format!(
                "manifest_id is not a valid storage key: {}",
                manifest.manifest_id
            ))
        })?;
        let document = manifest.to_json()?;

        // Write a sibling temp file and rename over the target so readers never
        // observe a partially written document.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.base_dir)
            .map_err(|e| Error::io(&self.base_dir, e))?;
        tmp.write_all(document.as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;

        debug!(id = %manifest.manifest_id, path = %path.display(), "saved manifest");
        Ok(())
    }

    fn load(&self, manifest_id: &str) -> Result<Manifest> {
        let path = self.existing_path(manifest_id)?;
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Manifest::from_json(&text)
    }

    fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| Error::io(&self.base_dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.base_dir, e))?.path();
            if path.is_file()
                && path.extension().and_then(|s| s.to_str()) == Some(MANIFEST_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }

        Ok(ids)
    }

    fn delete(&self, manifest_id: &str) -> Result<()> {
        let path = self.existing_path(manifest_id)?;
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        debug!(id = %manifest_id, "deleted manifest");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataSourceSpec;
    use anyhow::Result;
    use tempfile::TempDir;

    fn store() -> Result<(TempDir, FileManifestStore)> {
        let dir = TempDir::new()?;
        let store = FileManifestStore::new(dir.path().join("manifests"))?;
        Ok((dir, store))
    }

    fn manifest() -> Manifest {
        Manifest::new(DataSourceSpec::new("/data"), Vec::new(), Vec::new())
    }

    #[test]
    fn test_new_creates_directory() -> Result<()> {
        let (_dir, store) = store()?;
        assert!(store.base_dir().is_dir());
        Ok(())
    }

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let (_dir, store) = store()?;
        let m = manifest();
        store.save(&m)?;
        assert!(store.base_dir().join(format!("{}.json", m.manifest_id)).is_file());
        assert_eq!(store.load(&m.manifest_id)?, m);
        Ok(())
    }

    #[test]
    fn test_save_is_idempotent() -> Result<()> {
        let (_dir, store) = store()?;
        let m = manifest();
        store.save(&m)?;
        store.save(&m)?;
        assert_eq!(store.list()?, vec![m.manifest_id.clone()]);
        Ok(())
    }

    #[test]
    fn test_unknown_id_not_found() -> Result<()> {
        let (_dir, store) = store()?;
        assert!(store.load("missing").unwrap_err().is_not_found());
        assert!(store.delete("missing").unwrap_err().is_not_found());
        assert!(store.load("../escape").unwrap_err().is_not_found());
        Ok(())
    }

    #[test]
    fn test_list_ignores_other_files() -> Result<()> {
        let (_dir, store) = store()?;
        let m = manifest();
        store.save(&m)?;
        fs::write(store.base_dir().join("notes.txt"), "x")?;
        fs::create_dir(store.base_dir().join("nested.json"))?;
        assert_eq!(store.list()?, vec![m.manifest_id]);
        Ok(())
    }

    #[test]
    fn test_delete_and_clear() -> Result<()> {
        let (_dir, store) = store()?;
        let a = manifest();
        let b = manifest();
        let c = manifest();
        for m in [&a, &b, &c] {
            store.save(m)?;
        }

        store.delete(&a.manifest_id)?;
        assert!(store.load(&a.manifest_id).unwrap_err().is_not_found());
        assert_eq!(store.list()?.len(), 2);

        assert_eq!(store.clear()?, 2);
        assert!(store.list()?.is_empty());
        assert_eq!(store.clear()?, 0);
        Ok(())
    }

    #[test]
    fn test_load_all_sorted_by_creation() -> Result<()> {
        let (_dir, store) = store()?;
        let mut first = manifest();
        first.created_at -= chrono::Duration::hours(1);
        let second = manifest();
        store.save(&second)?;
        store.save(&first)?;

        let ids: Vec<String> = store
            .load_all()?
            .into_iter()
            .map(|m| m.manifest_id)
            .collect();
        assert_eq!(ids, [first.manifest_id, second.manifest_id]);
        Ok(())
    }

    #[test]
    fn test_corrupt_document_is_invalid() -> Result<()> {
        let (_dir, store) = store()?;
        fs::write(store.base_dir().join("bad.json"), "{ not json")?;
        let err = store.load("bad").unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(_)));
        Ok(())
    }
}
