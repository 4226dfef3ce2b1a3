//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`MONOKIT_` prefix, `__` between sections)
//! 3. Config file (`--config`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub workspace: WorkspaceConfig,
    pub docs: DocsConfig,
    pub install: InstallConfig,
    pub output: OutputConfig,
}

/// Monorepo layout, relative to `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    pub apps_dir: PathBuf,
    pub manifest: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            apps_dir: PathBuf::from("apps"),
            manifest: PathBuf::from("package.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub materials_dir: PathBuf,
    pub context_file: PathBuf,
    pub stories_dir: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            materials_dir: PathBuf::from("docs/project-materials"),
            context_file: PathBuf::from("docs/project-context.md"),
            stories_dir: PathBuf::from("docs/stories"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub package_manager: String,
    pub enabled: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            package_manager: "pnpm".into(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `MONOKIT_*`
    /// environment variables.
    ///
    /// The default location is always optional; an explicit `config_file`
    /// must exist when `must_exist` is set.
    pub fn load(config_file: Option<&Path>, must_exist: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), must_exist),
            None => (Self::config_path(), false),
        };

        let defaults = config::Config::try_from(&Self::default())
            .context("failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix("MONOKIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.monokit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "monokit", "monokit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".monokit.toml"))
    }

    /// Serialize as the TOML written by `monokit config init`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Look up a dotted key such as `workspace.apps_dir`.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        match tree.pointer(&pointer)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Absolute-or-relative paths for one invocation, with `--root` applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub apps_root: PathBuf,
    pub manifest: PathBuf,
    pub materials: PathBuf,
    pub context: PathBuf,
    pub stories: PathBuf,
}

impl WorkspacePaths {
    pub fn resolve(global: &GlobalArgs, config: &AppConfig) -> Self {
        let root = global
            .root
            .clone()
            .unwrap_or_else(|| config.workspace.root.clone());
        Self {
            apps_root: root.join(&config.workspace.apps_dir),
            manifest: root.join(&config.workspace.manifest),
            materials: root.join(&config.docs.materials_dir),
            context: root.join(&config.docs.context_file),
            stories: root.join(&config.docs.stories_dir),
            root,
        }
    }
}
