//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `monokit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::MonokitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `monokit_adapters::LocalFilesystem` (production)
/// - `monokit_adapters::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> MonokitResult<()>;

    /// Create a new file. Fails if anything already exists at `path`.
    fn create_file(&self, path: &Path, content: &str) -> MonokitResult<()>;

    /// Create or truncate a file.
    fn write_file(&self, path: &Path, content: &str) -> MonokitResult<()>;

    fn read_to_string(&self, path: &Path) -> MonokitResult<String>;

    /// Read a file, replacing invalid UTF-8 with U+FFFD instead of failing.
    fn read_to_string_lossy(&self, path: &Path) -> MonokitResult<String>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`, sorted.
    ///
    /// A missing `path` yields an empty list.
    fn list_dirs(&self, path: &Path) -> MonokitResult<Vec<String>>;

    /// Every `*.md` file below `root`, recursively, sorted by path.
    ///
    /// Symbolic links are not followed.
    fn list_markdown(&self, root: &Path) -> MonokitResult<Vec<PathBuf>>;
}

/// Port for installing workspace dependencies after scaffolding.
///
/// Implemented by `monokit_adapters::PackageManagerInstaller`.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyInstaller: Send + Sync {
    /// Install dependencies for the whole workspace rooted at `workspace_root`.
    fn install(&self, workspace_root: &Path) -> MonokitResult<()>;

    /// The command line this installer runs, for display.
    fn command_line(&self) -> String;
}
