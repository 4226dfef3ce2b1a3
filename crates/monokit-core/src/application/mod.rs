//! Application layer for monokit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (scaffold, manifest, analysis, story)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AnalysisService, ContextReport, ManifestService, MergeReport, ScaffoldReport,
    ScaffoldService, StoryReport, StoryService,
};

pub use ports::{DependencyInstaller, Filesystem};

pub use error::ApplicationError;
