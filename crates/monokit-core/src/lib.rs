//! monokit core - hexagonal architecture implementation
//!
//! Domain and application layers for the monokit monorepo tool: app
//! scaffolding into `apps/<name>/` and project-context synthesis from
//! free-form design documents.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           monokit-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  Scaffold, Manifest, Analysis, Story    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   Filesystem, DependencyInstaller       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    monokit-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  templates, manifest merge, classifier, │
//! │  signal extraction, context renderer    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use monokit_core::prelude::*;
//!
//! let request = AppRequest::new(
//!     AppName::parse("billing-api")?,
//!     Archetype::default_for(ArchetypeKind::BackendNode),
//! );
//! let service = ScaffoldService::new(filesystem);
//! let report = service.scaffold(&request, "apps".as_ref())?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AnalysisService, ManifestService, ScaffoldService, StoryService,
        ports::{DependencyInstaller, Filesystem},
    };
    pub use crate::domain::{
        AppName, AppRequest, Archetype, ArchetypeKind, LanguageMode, MobileVariant,
        NodeFramework, Port, PythonFramework, StoryDraft, StoryScope, WebFramework,
    };
    pub use crate::error::{MonokitError, MonokitResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
