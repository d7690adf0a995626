//! Filesystem access used by the materializer
//!
//! The materializer never touches `std::fs` directly. It goes through the
//! [`FileSystem`] trait so tests can run against [`MemoryFs`].

use crate::error::{Result, ScaffoldError};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Minimal set of filesystem operations needed to materialize templates
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, replacing anything already there
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Create a single directory; the parent is expected to exist
    fn create_dir(&self, path: &Path) -> Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents).map_err(|e| ScaffoldError::io(path, e))
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        match std::fs::create_dir(path) {
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            other => other.map_err(|e| ScaffoldError::io(path, e)),
        }
    }
}

/// In-memory filesystem for tests and dry runs
///
/// Records every write so callers can count them.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    writes: RefCell<Vec<PathBuf>>,
    created_dirs: RefCell<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, bypassing the write log
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.borrow_mut().insert(path.into());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Paths written through [`FileSystem::write`], in order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }

    /// Directories created through [`FileSystem::create_dir`], in order
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.created_dirs.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.writes.borrow_mut().clear();
        self.created_dirs.borrow_mut().clear();
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            ScaffoldError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        if self.dirs.borrow_mut().insert(path.to_path_buf()) {
            self.created_dirs.borrow_mut().push(path.to_path_buf());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_fs_create_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested");

        LocalFs.create_dir(&dir).unwrap();
        LocalFs.create_dir(&dir).unwrap();
        assert!(LocalFs.exists(&dir));
    }

    #[test]
    fn test_local_fs_read_missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.txt");

        let err = LocalFs.read_to_string(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_memory_fs_tracks_writes() {
        let fs = MemoryFs::new().with_file("/a.txt", "seeded");
        assert!(fs.exists(Path::new("/a.txt")));
        assert!(fs.writes().is_empty());

        fs.write(Path::new("/b.txt"), "new").unwrap();
        assert_eq!(fs.writes(), vec![PathBuf::from("/b.txt")]);
        assert_eq!(fs.contents("/b.txt").as_deref(), Some("new"));
    }
}
