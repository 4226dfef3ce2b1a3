// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to carry through reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid app name '{name}': {reason}")]
    InvalidAppName { name: String, reason: String },

    #[error("unknown {option} '{value}' (expected one of: {expected})")]
    UnknownOption {
        option: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid port '{value}': {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("story title '{title}' has no letters or digits")]
    InvalidStoryTitle { title: String },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("archetype '{archetype}' is not implemented yet")]
    UnimplementedArchetype { archetype: String },

    #[error("template for '{archetype}' produced an empty tree")]
    EmptyTree { archetype: String },

    #[error("duplicate path in generated tree: {path}")]
    DuplicatePath { path: String },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Manifest Errors
    // ========================================================================
    #[error("manifest is not valid: {reason}")]
    ManifestInvalid { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidAppName { .. } => vec![
                "App names must be kebab-case: lowercase letters, digits and hyphens".into(),
                "The first character must be a lowercase letter".into(),
                "Examples: api, billing-service, web2".into(),
            ],
            Self::UnknownOption {
                option, expected, ..
            } => vec![format!("Valid values for {option}: {expected}")],
            Self::InvalidPort { .. } => vec![
                "Use a number between 1 and 65535, or 'auto'".into(),
            ],
            Self::InvalidStoryTitle { .. } => vec![
                "The title becomes the file name; include at least one word".into(),
            ],
            Self::UnimplementedArchetype { archetype } => vec![
                format!("Scaffolding for '{archetype}' is not available yet"),
                "Supported archetypes: backend-node, backend-python, custom".into(),
                "Nothing was written to disk".into(),
            ],
            Self::ManifestInvalid { .. } => vec![
                "The root package.json must contain a JSON object".into(),
                "If a \"scripts\" key exists it must also be an object".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAppName { .. }
            | Self::UnknownOption { .. }
            | Self::InvalidPort { .. }
            | Self::InvalidStoryTitle { .. } => ErrorCategory::Validation,
            Self::UnimplementedArchetype { .. } => ErrorCategory::Unimplemented,
            Self::ManifestInvalid { .. } => ErrorCategory::Validation,
            Self::EmptyTree { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unimplemented,
    Internal,
}
