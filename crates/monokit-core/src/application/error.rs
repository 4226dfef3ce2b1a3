//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// An app directory with this name already exists.
    #[error("app already exists at {path}")]
    AppExists { path: PathBuf },

    /// A generated document would overwrite an existing file.
    #[error("file already exists at {path}")]
    FileExists { path: PathBuf },

    /// The document root to analyze does not exist.
    #[error("document root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The shared root manifest is missing.
    #[error("root manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// The project context has not been generated yet.
    #[error("project context not found: {path}")]
    ContextMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The package manager could not install dependencies.
    #[error("dependency installation failed ({command}): {reason}")]
    InstallFailed { command: String, reason: String },

    /// Content generation failed.
    #[error("rendering failed: {reason}")]
    RenderingFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AppExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different app name".into(),
                "Existing apps are never overwritten; remove the directory first if it is a leftover".into(),
            ],
            Self::FileExists { path } => vec![
                format!("Refusing to overwrite {}", path.display()),
                "Pick a different title or remove the existing file".into(),
            ],
            Self::RootNotFound { path } => vec![
                format!("Create {} and add your markdown documents", path.display()),
                "Use subdirectories requirements/, architecture/, design/, infrastructure/".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("Expected the workspace manifest at {}", path.display()),
                "Run monokit from the workspace root, or pass --root".into(),
            ],
            Self::ContextMissing { .. } => vec![
                "Generate it first: monokit init".into(),
                "Or skip the check with --skip-context-check".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure are left in place; remove them before retrying".into(),
            ],
            Self::InstallFailed { command, .. } => vec![
                format!("Run `{command}` manually to see the full output"),
                "Or skip installation with --no-install".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AppExists { .. } | Self::FileExists { .. } => ErrorCategory::Validation,
            Self::RootNotFound { .. }
            | Self::ManifestNotFound { .. }
            | Self::ContextMissing { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. }
            | Self::InstallFailed { .. }
            | Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let exists = ApplicationError::AppExists {
            path: "apps/api".into(),
        };
        assert_eq!(exists.category(), ErrorCategory::Validation);
        assert!(exists.to_string().contains("apps/api"));

        let missing = ApplicationError::RootNotFound {
            path: "docs/project-materials".into(),
        };
        assert_eq!(missing.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn install_failure_suggests_skipping() {
        let err = ApplicationError::InstallFailed {
            command: "pnpm install".into(),
            reason: "exit status 1".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--no-install")));
    }
}
