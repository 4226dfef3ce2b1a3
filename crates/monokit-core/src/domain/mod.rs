//! Core domain layer for monokit.
//!
//! Pure logic only: no filesystem, no clock, no environment. Everything that
//! touches the outside world goes through the ports in
//! [`crate::application::ports`].
//!
//! - Write path: [`validation`] → [`templates`] → [`entities::manifest`]
//! - Analyze path: [`entities::document`] → [`signals`] → [`report`]
//! - Story drafts: [`story`]

pub mod entities;
pub mod error;
pub mod report;
pub mod signals;
pub mod story;
pub mod templates;
pub mod validation;
pub mod value_objects;

pub use entities::{
    app_request::{AppName, AppRequest, Archetype},
    common::RelativePath,
    document::{Corpus, DocCategory, DocumentRecord, is_non_content},
    generated_tree::{DirectoryToCreate, FileToWrite, GeneratedTree, TreeEntry},
    manifest::{Manifest, ManifestEntry, MergeOutcome, ScriptSet},
};
pub use error::{DomainError, ErrorCategory};
pub use report::{ContextDocument, ReportOptions, WARNING_MARKER, render_context};
pub use signals::{AnalysisResult, CategoryCounts, ProjectDomain, StackDimension, TechStack, analyze};
pub use story::{StoryDraft, StoryScope, render_app_story, render_story, story_slug};
pub use templates::{RenderContext, TemplateDescriptor, TemplateRegistry};
pub use validation::validate_app_name;
pub use value_objects::{
    ArchetypeKind, LanguageMode, MobileVariant, NodeFramework, Port, PythonFramework,
    WebFramework,
};
