//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use monokit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{MonokitError, MonokitResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> MonokitResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_file(&self, path: &Path, content: &str) -> MonokitResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "create file"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> MonokitResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> MonokitResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_to_string_lossy(&self, path: &Path) -> MonokitResult<String> {
        let bytes = fs::read(path).map_err(|e| map_io_error(path, e, "read file"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, path: &Path) -> MonokitResult<Vec<String>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))? {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "read file type"))?
                .is_dir();
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn list_markdown(&self, root: &Path) -> MonokitResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for walk_entry in WalkDir::new(root).follow_links(false).min_depth(1) {
            let walk_entry = walk_entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().unwrap_or(root).to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;

            let is_markdown = walk_entry.file_type().is_file()
                && walk_entry.path().extension().is_some_and(|ext| ext == "md");
            if is_markdown {
                trace!(path = %walk_entry.path().display(), "markdown file found");
                paths.push(walk_entry.into_path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> MonokitError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_file_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        let fs = LocalFilesystem::new();

        fs.create_file(&path, "{}").unwrap();
        let err = fs.create_file(&path, "{\"x\":1}").unwrap_err();

        assert!(err.to_string().contains("create file"));
        assert_eq!(fs.read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn write_file_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "long content").unwrap();
        fs.write_file(&path, "short").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn lossy_read_replaces_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("legacy.md");
        std::fs::write(&path, [0x63, 0x61, 0x66, 0xE9]).unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.read_to_string(&path).is_err());
        assert_eq!(fs.read_to_string_lossy(&path).unwrap(), "caf\u{FFFD}");
    }

    #[test]
    fn list_dirs_returns_sorted_directory_names_only() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("web")).unwrap();
        std::fs::create_dir(temp.path().join("api")).unwrap();
        std::fs::write(temp.path().join("notes.txt"), "").unwrap();

        let fs = LocalFilesystem::new();
        assert_eq!(fs.list_dirs(temp.path()).unwrap(), ["api", "web"]);
        assert!(fs.list_dirs(&temp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn list_markdown_is_recursive_and_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("requirements/prd")).unwrap();
        std::fs::create_dir_all(root.join("architecture")).unwrap();
        std::fs::write(root.join("requirements/prd/v1.md"), "").unwrap();
        std::fs::write(root.join("architecture/stack.md"), "").unwrap();
        std::fs::write(root.join("architecture/diagram.png"), "").unwrap();
        std::fs::write(root.join("README.md"), "").unwrap();

        let found = LocalFilesystem::new().list_markdown(root).unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            relative,
            ["README.md", "architecture/stack.md", "requirements/prd/v1.md"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn list_markdown_does_not_follow_symlinks() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.md"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("linked")).unwrap();
        std::fs::write(temp.path().join("own.md"), "").unwrap();

        let found = LocalFilesystem::new().list_markdown(temp.path()).unwrap();
        assert_eq!(found, vec![temp.path().join("own.md")]);
    }
}
