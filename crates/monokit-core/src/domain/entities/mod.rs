pub mod app_request;
pub mod common;
pub mod document;
pub mod generated_tree;
pub mod manifest;

pub use crate::domain::DomainError;
pub use app_request::{AppName, AppRequest, Archetype};
pub use document::{Corpus, DocCategory, DocumentRecord};
pub use generated_tree::GeneratedTree;
pub use manifest::{Manifest, ScriptSet};
