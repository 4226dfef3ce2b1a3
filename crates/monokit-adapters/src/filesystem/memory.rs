//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use monokit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{MonokitError, MonokitResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and inspect
/// the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        {
            let mut inner = self.write();
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_chain(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed an empty directory (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.write().add_dir_chain(path.as_ref());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().files.get(path.as_ref()).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    // Poisoning only happens if a test panicked mid-write; keep going with the data.
    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn fs_error(path: &Path, reason: &str) -> MonokitError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn check_parent(inner: &MemoryFilesystemInner, path: &Path) -> MonokitResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) => {
            Err(fs_error(path, "parent directory does not exist"))
        }
        _ => Ok(()),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> MonokitResult<()> {
        let mut inner = self.write();
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "a file exists at this path"));
        }
        inner.add_dir_chain(path);
        Ok(())
    }

    fn create_file(&self, path: &Path, content: &str) -> MonokitResult<()> {
        let mut inner = self.write();
        check_parent(&inner, path)?;
        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(fs_error(path, "file already exists"));
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> MonokitResult<()> {
        let mut inner = self.write();
        check_parent(&inner, path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> MonokitResult<String> {
        self.read()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "file not found"))
    }

    // Content is stored as `String`, so it is always valid UTF-8.
    fn read_to_string_lossy(&self, path: &Path) -> MonokitResult<String> {
        self.read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().directories.contains(path)
    }

    fn list_dirs(&self, path: &Path) -> MonokitResult<Vec<String>> {
        let inner = self.read();
        Ok(inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(path))
            .filter_map(|d| d.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }

    fn list_markdown(&self, root: &Path) -> MonokitResult<Vec<PathBuf>> {
        let inner = self.read();
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .cloned()
            .collect())
    }
}
