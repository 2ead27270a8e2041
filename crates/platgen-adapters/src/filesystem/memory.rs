//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use platgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::PlatgenResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to the pipeline and
/// inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    fn read(&self) -> PlatgenResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> PlatgenResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn store(&self, path: &Path, content: Vec<u8>) -> PlatgenResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content);
        Ok(())
    }

    fn not_found(path: &Path) -> ApplicationError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "No such file".into(),
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> PlatgenResult<()> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PlatgenResult<()> {
        self.store(path, content.as_bytes().to_vec())
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> PlatgenResult<()> {
        self.store(path, content.to_vec())
    }

    fn read_to_string(&self, path: &Path) -> PlatgenResult<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Not valid UTF-8: {e}"),
            }
            .into()
        })
    }

    fn read_bytes(&self, path: &Path) -> PlatgenResult<Vec<u8>> {
        let inner = self.read()?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path).into())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> PlatgenResult<()> {
        let mut inner = self.write()?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> PlatgenResult<()> {
        let mut inner = self.write()?;
        inner
            .files
            .remove(path)
            .ok_or_else(|| Self::not_found(path))?;
        inner.executables.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/out/README.md"), "x").is_err());

        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write_file(Path::new("/out/README.md"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/out/README.md")).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("/a/b")).unwrap();
        fs.write_bytes(Path::new("/a/b/c.zip"), &[1, 2]).unwrap();

        assert!(view.exists(Path::new("/a")));
        assert_eq!(view.read_bytes(Path::new("/a/b/c.zip")).unwrap(), vec![1, 2]);
    }

    #[test]
    fn removing_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs.remove_file(Path::new("/nope")).is_err());
    }
}
