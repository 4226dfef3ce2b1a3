//! Classified markdown documents.
//!
//! Classification is purely structural: a document's category comes from the
//! directory segments of its path, never from its content.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Category of a source document, derived from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocCategory {
    Requirements,
    Architecture,
    Design,
    Infrastructure,
    Unclassified,
}

impl DocCategory {
    /// Categories with a directory marker, in match priority order.
    pub const CLASSIFIED: [DocCategory; 4] = [
        Self::Requirements,
        Self::Architecture,
        Self::Design,
        Self::Infrastructure,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requirements => "requirements",
            Self::Architecture => "architecture",
            Self::Design => "design",
            Self::Infrastructure => "infrastructure",
            Self::Unclassified => "unclassified",
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Requirements => "Requirements",
            Self::Architecture => "Architecture",
            Self::Design => "Design",
            Self::Infrastructure => "Infrastructure",
            Self::Unclassified => "Unclassified",
        }
    }

    /// Classify a path by its directory segments.
    ///
    /// Total: anything without a marker segment is `Unclassified`.
    pub fn classify(path: &Path) -> Self {
        let normalized = format!("/{}/", slash_path(path).trim_matches('/'));
        Self::CLASSIFIED
            .into_iter()
            .find(|cat| normalized.contains(&format!("/{}/", cat.as_str())))
            .unwrap_or(Self::Unclassified)
    }
}

impl fmt::Display for DocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filename markers that identify scaffolding rather than user content.
const NON_CONTENT_MARKERS: [&str; 3] = ["README.md", "EXAMPLE-", ".gitkeep"];

/// Whether a path is template scaffolding (readme, example, placeholder).
///
/// Markers are matched anywhere in the path, so they apply in every directory.
pub fn is_non_content(path: &Path) -> bool {
    let s = slash_path(path);
    NON_CONTENT_MARKERS.iter().any(|m| s.contains(m))
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// One classified markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Path as it should be cited in reports (relative to the project root).
    pub path: PathBuf,
    #[serde(skip)]
    pub raw_content: String,
    pub category: DocCategory,
}

impl DocumentRecord {
    /// Build a record, classifying it from `classify_path`.
    ///
    /// `classify_path` is the location relative to the scanned document root,
    /// so directories above the root never influence the category.
    pub fn new(path: impl Into<PathBuf>, classify_path: &Path, raw_content: String) -> Self {
        Self {
            path: path.into(),
            raw_content,
            category: DocCategory::classify(classify_path),
        }
    }

    pub fn display_path(&self) -> String {
        slash_path(&self.path)
    }
}

/// Result of scanning a document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    /// Every markdown file found, including scaffolding files.
    pub all: Vec<PathBuf>,
    /// The user-content subset, classified.
    pub content: Vec<DocumentRecord>,
}

impl Corpus {
    pub fn by_category(&self, category: DocCategory) -> impl Iterator<Item = &DocumentRecord> {
        self.content.iter().filter(move |d| d.category == category)
    }

    pub fn count(&self, category: DocCategory) -> usize {
        self.by_category(category).count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_directory_segment() {
        assert_eq!(
            DocCategory::classify(Path::new("/p/docs/architecture/x.md")),
            DocCategory::Architecture
        );
        assert_eq!(
            DocCategory::classify(Path::new("docs/requirements/prd/v1.md")),
            DocCategory::Requirements
        );
        assert_eq!(
            DocCategory::classify(Path::new("/p/infrastructure/ci.md")),
            DocCategory::Infrastructure
        );
        assert_eq!(
            DocCategory::classify(Path::new("/p/design/tokens.md")),
            DocCategory::Design
        );
    }

    #[test]
    fn segment_must_match_whole_directory_name() {
        assert_eq!(
            DocCategory::classify(Path::new("/p/system-design/x.md")),
            DocCategory::Unclassified
        );
        // The file name itself is not a directory segment.
        assert_eq!(
            DocCategory::classify(Path::new("/p/notes/design.md")),
            DocCategory::Unclassified
        );
    }

    #[test]
    fn first_marker_wins_when_several_match() {
        assert_eq!(
            DocCategory::classify(Path::new("/p/design/requirements/a.md")),
            DocCategory::Requirements
        );
    }

    #[test]
    fn unmarked_paths_are_unclassified() {
        assert_eq!(
            DocCategory::classify(Path::new("/p/notes/todo.md")),
            DocCategory::Unclassified
        );
    }

    #[test]
    fn non_content_markers_apply_anywhere() {
        assert!(is_non_content(Path::new("/p/README.md")));
        assert!(is_non_content(Path::new("/p/architecture/README.md")));
        assert!(is_non_content(Path::new("/p/requirements/EXAMPLE-prd.md")));
        assert!(is_non_content(Path::new("/p/design/.gitkeep")));
        assert!(!is_non_content(Path::new("/p/design/readme-notes.md")));
        assert!(!is_non_content(Path::new("/p/requirements/prd.md")));
    }
}
