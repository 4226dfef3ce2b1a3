//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: scaffold an app, merge its scripts, generate the
//! project context, write stories.

pub mod analysis_service;
pub mod manifest_service;
pub mod scaffold_service;
pub mod story_service;

pub use analysis_service::{AnalysisService, ContextReport};
pub use manifest_service::{ManifestService, MergeReport};
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
pub use story_service::{StoryReport, StoryService};
