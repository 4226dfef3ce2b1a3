//! Template registry.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TemplateRegistry::descriptor(&Archetype)                    │
//! │  └── TemplateDescriptor (static per archetype)               │
//! │      ├── directories   (parents before children)             │
//! │      └── files         (relative path + content producer)    │
//! │                                                              │
//! │  TemplateDescriptor::render(&RenderContext, root)            │
//! │  └── GeneratedTree (validated, nothing written yet)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers are plain functions of the [`RenderContext`]. They must not read
//! the clock or the environment: the same request always yields a
//! byte-identical tree.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::{
    entities::{
        app_request::{AppRequest, Archetype},
        common::RelativePath,
        generated_tree::GeneratedTree,
    },
    error::DomainError,
    value_objects::{ArchetypeKind, LanguageMode},
};

mod custom;
mod node;
mod python;

/// Conventional port per archetype when the request says `auto`.
pub const fn default_port(kind: ArchetypeKind) -> u16 {
    match kind {
        ArchetypeKind::BackendNode => 3000,
        ArchetypeKind::BackendPython => 8000,
        ArchetypeKind::FrontendWeb => 5173,
        ArchetypeKind::FrontendMobile => 8081,
        ArchetypeKind::Custom => 8080,
    }
}

/// Produces the content of one generated file.
pub type ContentProducer = fn(&RenderContext) -> String;

/// One file in a descriptor.
#[derive(Clone)]
pub struct FileTemplate {
    pub path: String,
    pub produce: ContentProducer,
}

impl FileTemplate {
    pub fn new(path: impl Into<String>, produce: ContentProducer) -> Self {
        Self {
            path: path.into(),
            produce,
        }
    }
}

impl std::fmt::Debug for FileTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTemplate")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Everything needed to materialize one archetype.
#[derive(Debug, Clone)]
pub struct TemplateDescriptor {
    pub kind: ArchetypeKind,
    pub directories: Vec<&'static str>,
    pub files: Vec<FileTemplate>,
}

impl TemplateDescriptor {
    /// Render every file in memory and validate the resulting tree.
    pub fn render(
        &self,
        ctx: &RenderContext,
        root: impl AsRef<Path>,
    ) -> Result<GeneratedTree, DomainError> {
        let mut tree = GeneratedTree::new(root.as_ref());
        for dir in &self.directories {
            tree.add_directory(RelativePath::try_new(*dir)?);
        }
        for file in &self.files {
            tree.add_file(RelativePath::try_new(&file.path)?, (file.produce)(ctx));
        }
        tree.validate()?;
        Ok(tree)
    }

    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}

/// Maps archetypes to their descriptors.
pub struct TemplateRegistry;

impl TemplateRegistry {
    /// Resolve the descriptor for an archetype.
    ///
    /// # Errors
    ///
    /// `UnimplementedArchetype` for archetypes without a generator. Callers
    /// must check this before touching the filesystem.
    pub fn descriptor(archetype: &Archetype) -> Result<TemplateDescriptor, DomainError> {
        match archetype {
            Archetype::BackendNode { language, .. } => Ok(node::descriptor(*language)),
            Archetype::BackendPython { .. } => Ok(python::descriptor()),
            Archetype::Custom { .. } => Ok(custom::descriptor()),
            Archetype::FrontendWeb { .. } | Archetype::FrontendMobile { .. } => {
                Err(DomainError::UnimplementedArchetype {
                    archetype: archetype.kind().as_str().to_string(),
                })
            }
        }
    }

    /// Archetype kinds that currently have a generator.
    pub fn implemented() -> Vec<ArchetypeKind> {
        ArchetypeKind::ALL
            .into_iter()
            .filter(|k| Self::descriptor(&Archetype::default_for(*k)).is_ok())
            .collect()
    }
}

/// Values available to content producers.
///
/// Built-in variables, substituted by [`RenderContext::render`]:
///
/// | Variable | Example |
/// |----------|---------|
/// | `APP_NAME` | `billing-api` |
/// | `APP_NAME_SNAKE` | `billing_api` |
/// | `APP_TITLE` | `Billing Api` |
/// | `PORT` | `3000` |
/// | `FRAMEWORK` | `express` |
/// | `EXT` | `ts` |
#[derive(Debug, Clone)]
pub struct RenderContext {
    archetype: Archetype,
    port: u16,
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    pub fn new(request: &AppRequest) -> Self {
        let archetype = *request.archetype();
        let name = request.name().as_str();
        let port = archetype
            .port()
            .map(|p| p.resolve(default_port(archetype.kind())))
            .unwrap_or_else(|| default_port(archetype.kind()));
        let language = archetype.language().unwrap_or_default();

        let mut variables = BTreeMap::new();
        variables.insert("APP_NAME", name.to_string());
        variables.insert("APP_NAME_SNAKE", name.replace('-', "_"));
        variables.insert("APP_TITLE", to_title(name));
        variables.insert("PORT", port.to_string());
        variables.insert(
            "FRAMEWORK",
            archetype.framework_name().unwrap_or("none").to_string(),
        );
        variables.insert("EXT", language.extension().to_string());

        Self {
            archetype,
            port,
            variables,
        }
    }

    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    pub fn app_name(&self) -> &str {
        self.get("APP_NAME").unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn language(&self) -> LanguageMode {
        self.archetype.language().unwrap_or_default()
    }

    pub fn is_typed(&self) -> bool {
        self.language().is_typed()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace `{{VARIABLE}}` placeholders. Unknown placeholders stay as-is.
    pub fn render(&self, template: &str) -> String {
        let mut out = template.to_string();
        for (key, value) in &self.variables {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }
        out
    }
}

/// `billing-api` -> `Billing Api`
fn to_title(name: &str) -> String {
    name.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pretty JSON with a trailing newline, the way package managers write it.
pub(crate) fn pretty_json(value: &serde_json::Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}
