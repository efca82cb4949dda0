use memmap2::MmapOptions;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Files at or above this size are hashed through a memory map.
pub const DEFAULT_MMAP_THRESHOLD: u64 = 1_048_576;

/// Read buffer size for streamed hashing.
const CHUNK_SIZE: usize = 64 * 1024;

/// Hex-encoded SHA-256 of a byte slice.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Hex-encoded SHA-256 of a file's full content.
///
/// Small files are streamed; files of `mmap_threshold` bytes or more are mapped
/// into memory. Both paths yield the same digest.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened, mapped or read.
pub fn hash_file(path: &Path, mmap_threshold: u64) -> io::Result<String> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    if len < mmap_threshold.max(1) {
        return hash_reader(file);
    }

    // SAFETY: the map is read-only and dropped before returning. A concurrent
    // writer can change the bytes we hash, the same as with a streamed read.
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    Ok(hash_bytes(&mmap))
}

/// Hex-encoded SHA-256 of everything a reader yields.
///
/// # Errors
///
/// Propagates read errors.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const HELLO_WORLD: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_hash_bytes_known_vector() {
        assert_eq!(hash_bytes(b"hello world"), HELLO_WORLD);
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.txt");
        std::fs::write(&file_path, "hello world")?;

        let hash = hash_file(&file_path, DEFAULT_MMAP_THRESHOLD)?;
        assert_eq!(hash, HELLO_WORLD);
        assert_eq!(hash.len(), 64);

        Ok(())
    }

    #[test]
    fn test_mmap_and_streaming_agree() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("big.bin");
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&file_path, &content)?;

        let streamed = hash_file(&file_path, u64::MAX)?;
        let mapped = hash_file(&file_path, 1)?;
        assert_eq!(streamed, mapped);
        assert_eq!(streamed, hash_bytes(&content));

        Ok(())
    }

    #[test]
    fn test_hash_changes_with_content() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("a.txt");

        std::fs::write(&file_path, "hello")?;
        let before = hash_file(&file_path, DEFAULT_MMAP_THRESHOLD)?;
        std::fs::write(&file_path, "goodbye")?;
        let after = hash_file(&file_path, DEFAULT_MMAP_THRESHOLD)?;

        assert_ne!(before, after);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(hash_file(&dir.path().join("nope"), DEFAULT_MMAP_THRESHOLD).is_err());
    }

    #[test]
    fn test_empty_file_and_directory() -> Result<()> {
        let dir = tempdir()?;
        let empty = dir.path().join("empty");
        std::fs::write(&empty, "")?;

        for threshold in [1, DEFAULT_MMAP_THRESHOLD, u64::MAX] {
            assert_eq!(hash_file(&empty, threshold)?, hash_bytes(b""));
        }
        assert!(hash_file(dir.path(), DEFAULT_MMAP_THRESHOLD).is_err());
        Ok(())
    }
}
