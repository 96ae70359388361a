//! File access used by loading and generation.
//!
//! Writes are whole-file and atomic per file: content goes to a temporary file
//! in the destination directory, which is then renamed over the target. A
//! store assumes a single writer; two processes generating into the same
//! output path at once may interleave whole files.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            StoreError::Read { path, .. } | StoreError::Write { path, .. } => path,
        }
    }
}

pub trait FileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

    /// Replace `path` with `contents`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError>;

    fn exists(&self, path: &Path) -> bool;
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileStore;

impl FileStore for OsFileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        std::fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let wrap = |source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(wrap)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
        tmp.write_all(contents).map_err(wrap)?;
        tmp.as_file().sync_all().map_err(wrap)?;
        tmp.persist(path).map_err(|e| wrap(e.error))?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), contents.into());
        }
        self
    }

    /// Paths currently held, in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        let files = self.files.read().ok()?;
        files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

fn poisoned(path: &Path) -> io::Error {
    io::Error::other(format!("store lock poisoned while accessing {}", path.display()))
}

impl FileStore for MemoryFileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        let files = self.files.read().map_err(|_| StoreError::Read {
            path: path.to_path_buf(),
            source: poisoned(path),
        })?;
        files.get(path).cloned().ok_or_else(|| StoreError::Read {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let mut files = self.files.write().map_err(|_| StoreError::Write {
            path: path.to_path_buf(),
            source: poisoned(path),
        })?;
        files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/c.txt");
        OsFileStore.write(&path, b"hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(OsFileStore.exists(&path));
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.go");
        OsFileStore.write(&path, b"a much longer first version").unwrap();
        OsFileStore.write(&path, b"short").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        OsFileStore.write(&tmp.path().join("one"), b"1").unwrap();
        OsFileStore.write(&tmp.path().join("one"), b"2").unwrap();
        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_read_missing_carries_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.json");
        let err = OsFileStore.read(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryFileStore::new().with_file("flags.json", "{}");
        assert!(store.exists(Path::new("flags.json")));
        assert_eq!(store.read(Path::new("flags.json")).unwrap(), b"{}");
        store.write(Path::new("out/x.py"), b"x").unwrap();
        assert_eq!(
            store.paths(),
            vec![PathBuf::from("flags.json"), PathBuf::from("out/x.py")]
        );
        assert_eq!(store.contents(Path::new("out/x.py")).as_deref(), Some("x"));
        assert!(store.read(Path::new("nope")).is_err());
    }
}
