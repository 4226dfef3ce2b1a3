//! Domain value objects: archetype kinds and their option enums.
//!
//! # Design
//!
//! These are pure value types: `Copy` with equality by value.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers. Which archetypes can be
//! generated is decided by `templates::TemplateRegistry`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Build the "expected one of" list for an `UnknownOption` error.
fn expected(values: &[&str]) -> String {
    values.join(", ")
}

// ── ArchetypeKind ────────────────────────────────────────────────────────────

/// The payload-free tag of an [`Archetype`](crate::domain::Archetype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchetypeKind {
    BackendNode,
    BackendPython,
    FrontendWeb,
    FrontendMobile,
    Custom,
}

impl ArchetypeKind {
    pub const ALL: [ArchetypeKind; 5] = [
        Self::BackendNode,
        Self::BackendPython,
        Self::FrontendWeb,
        Self::FrontendMobile,
        Self::Custom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BackendNode => "backend-node",
            Self::BackendPython => "backend-python",
            Self::FrontendWeb => "frontend-web",
            Self::FrontendMobile => "frontend-mobile",
            Self::Custom => "custom",
        }
    }

    /// Human-readable label used in stories and summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BackendNode => "Node.js API",
            Self::BackendPython => "Python API",
            Self::FrontendWeb => "React Web",
            Self::FrontendMobile => "React Native Mobile",
            Self::Custom => "Custom",
        }
    }

    /// Backends get the API-style module layout; everything else is UI-shaped.
    pub const fn is_backend(&self) -> bool {
        matches!(self, Self::BackendNode | Self::BackendPython)
    }
}

impl fmt::Display for ArchetypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchetypeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backend-node" | "node" | "nodejs" => Ok(Self::BackendNode),
            "backend-python" | "python" => Ok(Self::BackendPython),
            "frontend-web" | "web" | "react-web" => Ok(Self::FrontendWeb),
            "frontend-mobile" | "mobile" | "react-native" => Ok(Self::FrontendMobile),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::UnknownOption {
                option: "archetype",
                value: other.into(),
                expected: expected(&Self::ALL.map(|k| k.as_str())),
            }),
        }
    }
}

// ── Frameworks ───────────────────────────────────────────────────────────────

/// HTTP library binding for the Node.js backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeFramework {
    #[default]
    Express,
    Fastify,
    Hono,
}

impl NodeFramework {
    pub const ALL: [NodeFramework; 3] = [Self::Express, Self::Fastify, Self::Hono];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::Hono => "hono",
        }
    }
}

impl fmt::Display for NodeFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "express" => Ok(Self::Express),
            "fastify" => Ok(Self::Fastify),
            "hono" => Ok(Self::Hono),
            other => Err(DomainError::UnknownOption {
                option: "node framework",
                value: other.into(),
                expected: expected(&Self::ALL.map(|f| f.as_str())),
            }),
        }
    }
}

/// Framework for the Python backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PythonFramework {
    #[default]
    Flask,
    FastApi,
}

impl PythonFramework {
    pub const ALL: [PythonFramework; 2] = [Self::Flask, Self::FastApi];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flask => "flask",
            Self::FastApi => "fastapi",
        }
    }
}

impl fmt::Display for PythonFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PythonFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flask" => Ok(Self::Flask),
            "fastapi" | "fast-api" => Ok(Self::FastApi),
            other => Err(DomainError::UnknownOption {
                option: "python framework",
                value: other.into(),
                expected: expected(&Self::ALL.map(|f| f.as_str())),
            }),
        }
    }
}

/// Bundler/framework for the browser frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebFramework {
    Vite,
    #[default]
    NextJs,
    Cra,
}

impl WebFramework {
    pub const ALL: [WebFramework; 3] = [Self::Vite, Self::NextJs, Self::Cra];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vite => "vite",
            Self::NextJs => "nextjs",
            Self::Cra => "cra",
        }
    }
}

impl fmt::Display for WebFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vite" => Ok(Self::Vite),
            "nextjs" | "next" => Ok(Self::NextJs),
            "cra" => Ok(Self::Cra),
            other => Err(DomainError::UnknownOption {
                option: "web framework",
                value: other.into(),
                expected: expected(&Self::ALL.map(|f| f.as_str())),
            }),
        }
    }
}

/// Flavour of the React Native app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MobileVariant {
    Bare,
    #[default]
    Expo,
    ExpoRouter,
}

impl MobileVariant {
    pub const ALL: [MobileVariant; 3] = [Self::Bare, Self::Expo, Self::ExpoRouter];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Expo => "expo",
            Self::ExpoRouter => "expo-router",
        }
    }
}

impl fmt::Display for MobileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MobileVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bare" => Ok(Self::Bare),
            "expo" => Ok(Self::Expo),
            "expo-router" => Ok(Self::ExpoRouter),
            other => Err(DomainError::UnknownOption {
                option: "mobile variant",
                value: other.into(),
                expected: expected(&Self::ALL.map(|v| v.as_str())),
            }),
        }
    }
}

// ── LanguageMode ─────────────────────────────────────────────────────────────

/// Typed (TypeScript) or untyped (JavaScript) sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    #[default]
    Typed,
    Untyped,
}

impl LanguageMode {
    pub const fn is_typed(&self) -> bool {
        matches!(self, Self::Typed)
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Typed => "ts",
            Self::Untyped => "js",
        }
    }

    pub const fn language_name(&self) -> &'static str {
        match self {
            Self::Typed => "TypeScript",
            Self::Untyped => "JavaScript",
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Typed => "typed",
            Self::Untyped => "untyped",
        })
    }
}

// ── Port ─────────────────────────────────────────────────────────────────────

/// Listening port requested for a generated service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    /// Use the archetype's conventional port.
    #[default]
    Auto,
    Fixed(u16),
}

impl Port {
    /// Resolve to a concrete port number.
    pub const fn resolve(&self, fallback: u16) -> u16 {
        match self {
            Self::Auto => fallback,
            Self::Fixed(p) => *p,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(p) => write!(f, "{p}"),
        }
    }
}

impl FromStr for Port {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        match trimmed.parse::<u16>() {
            Ok(0) => Err(DomainError::InvalidPort {
                value: s.into(),
                reason: "port 0 is reserved".into(),
            }),
            Ok(p) => Ok(Self::Fixed(p)),
            Err(e) => Err(DomainError::InvalidPort {
                value: s.into(),
                reason: e.to_string(),
            }),
        }
    }
}
