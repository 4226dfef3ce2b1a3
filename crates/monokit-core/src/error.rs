//! Unified error handling for monokit core.
//!
//! Wraps domain and application errors behind one type, with user-actionable
//! suggestions and a category the CLI maps to exit codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for monokit core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MonokitError {
    /// Errors from the domain layer (business rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MonokitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Inspect the effective settings with: monokit config list".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in monokit".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Unimplemented => ErrorCategory::Unimplemented,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Unimplemented,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MonokitResult<T> = Result<T, MonokitError>;
