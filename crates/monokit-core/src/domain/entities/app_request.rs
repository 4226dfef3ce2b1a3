use std::fmt;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    validation::validate_app_name,
    value_objects::{
        ArchetypeKind, LanguageMode, MobileVariant, NodeFramework, Port, PythonFramework,
        WebFramework,
    },
};

/// A validated application name.
///
/// Invariant: matches `^[a-z][a-z0-9-]*$`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppName(String);

impl AppName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_app_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of application to generate, with its archetype-specific options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "archetype", rename_all = "kebab-case")]
pub enum Archetype {
    BackendNode {
        framework: NodeFramework,
        language: LanguageMode,
        port: Port,
    },
    BackendPython {
        framework: PythonFramework,
        port: Port,
    },
    FrontendWeb {
        framework: WebFramework,
        language: LanguageMode,
        port: Port,
    },
    FrontendMobile {
        variant: MobileVariant,
    },
    Custom {
        port: Port,
    },
}

impl Archetype {
    /// The archetype with every option at its default.
    pub fn default_for(kind: ArchetypeKind) -> Self {
        match kind {
            ArchetypeKind::BackendNode => Self::BackendNode {
                framework: NodeFramework::default(),
                language: LanguageMode::default(),
                port: Port::Auto,
            },
            ArchetypeKind::BackendPython => Self::BackendPython {
                framework: PythonFramework::default(),
                port: Port::Auto,
            },
            ArchetypeKind::FrontendWeb => Self::FrontendWeb {
                framework: WebFramework::default(),
                language: LanguageMode::default(),
                port: Port::Auto,
            },
            ArchetypeKind::FrontendMobile => Self::FrontendMobile {
                variant: MobileVariant::default(),
            },
            ArchetypeKind::Custom => Self::Custom { port: Port::Auto },
        }
    }

    pub const fn kind(&self) -> ArchetypeKind {
        match self {
            Self::BackendNode { .. } => ArchetypeKind::BackendNode,
            Self::BackendPython { .. } => ArchetypeKind::BackendPython,
            Self::FrontendWeb { .. } => ArchetypeKind::FrontendWeb,
            Self::FrontendMobile { .. } => ArchetypeKind::FrontendMobile,
            Self::Custom { .. } => ArchetypeKind::Custom,
        }
    }

    /// Framework or variant name, if the archetype has one.
    pub fn framework_name(&self) -> Option<&'static str> {
        match self {
            Self::BackendNode { framework, .. } => Some(framework.as_str()),
            Self::BackendPython { framework, .. } => Some(framework.as_str()),
            Self::FrontendWeb { framework, .. } => Some(framework.as_str()),
            Self::FrontendMobile { variant } => Some(variant.as_str()),
            Self::Custom { .. } => None,
        }
    }

    /// Language mode; archetypes without a JS/TS choice report `None`.
    pub const fn language(&self) -> Option<LanguageMode> {
        match self {
            Self::BackendNode { language, .. } | Self::FrontendWeb { language, .. } => {
                Some(*language)
            }
            _ => None,
        }
    }

    pub const fn port(&self) -> Option<Port> {
        match self {
            Self::BackendNode { port, .. }
            | Self::BackendPython { port, .. }
            | Self::FrontendWeb { port, .. }
            | Self::Custom { port } => Some(*port),
            Self::FrontendMobile { .. } => None,
        }
    }

    /// Whether a `typecheck:<app>` script makes sense for this archetype.
    pub const fn has_typecheck(&self) -> bool {
        match self.language() {
            Some(mode) => mode.is_typed(),
            None => false,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if let Some(fw) = self.framework_name() {
            write!(f, " ({fw}")?;
            if let Some(lang) = self.language() {
                write!(f, ", {}", lang.language_name())?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A request to scaffold one application.
///
/// Immutable once constructed; the name has already passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRequest {
    name: AppName,
    archetype: Archetype,
}

impl AppRequest {
    pub fn new(name: AppName, archetype: Archetype) -> Self {
        Self { name, archetype }
    }

    pub fn name(&self) -> &AppName {
        &self.name
    }

    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }
}

impl fmt::Display for AppRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.archetype)
    }
}
