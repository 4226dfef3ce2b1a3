use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Concrete file tree ready for materialization.
///
/// This is the output of applying a template descriptor to an app request.
/// It contains no business logic, only data; entries keep the order in which
/// they must be created (directories before the files inside them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTree {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<TreeEntry>,
}

impl GeneratedTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries.push(TreeEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.entries
            .push(TreeEntry::File(FileToWrite { path, content }));
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Reject empty trees and duplicate paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyTree {
                archetype: self.root.display().to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            TreeEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            TreeEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Look up a file's rendered content by its relative path.
    pub fn file(&self, path: &str) -> Option<&FileToWrite> {
        self.files().find(|f| f.path.to_slash_string() == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl TreeEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}
