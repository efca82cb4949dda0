#![allow(dead_code)]

use anyhow::Result;
use neurolab::{DataSourceSpec, NeurolabContext};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Data directory fixture:
///
/// ```text
/// data/
///   bar.bin      [0, 1, 2, 3]
///   foo.txt      "hello"
///   sub/baz.txt  "world"
/// ```
pub struct TestData {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestData {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("data");
        fs::create_dir_all(root.join("sub"))?;

        fs::write(root.join("foo.txt"), b"hello")?;
        fs::write(root.join("bar.bin"), [0u8, 1, 2, 3])?;
        fs::write(root.join("sub").join("baz.txt"), b"world")?;

        Ok(Self { temp_dir, root })
    }

    /// Writes `content` at `relative` under the data root, creating parents.
    pub fn write(&self, relative: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn spec(&self) -> DataSourceSpec {
        DataSourceSpec::new(self.root.to_string_lossy())
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.temp_dir.path().join("manifests")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Context with store and config inside the fixture directory.
    pub fn context(&self) -> Result<NeurolabContext> {
        NeurolabContext::new_explicit(self.store_path(), self.config_path())
    }
}

/// SHA-256 of "hello".
pub const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// SHA-256 of "world".
pub const WORLD_SHA256: &str = "486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7";
