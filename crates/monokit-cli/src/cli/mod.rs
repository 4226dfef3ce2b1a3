//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use monokit_core::domain::{ArchetypeKind, LanguageMode, Port};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "monokit",
    bin_name = "monokit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Monorepo app scaffolding and project context",
    long_about = "monokit adds apps to a pnpm monorepo under apps/<name>/ and \
                  turns the design documents in docs/project-materials/ into \
                  docs/project-context.md.",
    after_help = "EXAMPLES:\n\
        \x20 monokit init\n\
        \x20 monokit add billing-api --archetype backend-node --framework fastify\n\
        \x20 monokit add ml-service  --archetype backend-python --framework fastapi --port 8001\n\
        \x20 monokit story --title \"Invoice export\" --app billing-api\n\
        \x20 monokit completions bash > /usr/share/bash-completion/completions/monokit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new app and register its scripts.
    #[command(
        visible_alias = "a",
        about = "Add an app to the monorepo",
        after_help = "EXAMPLES:\n\
            \x20 monokit add billing-api --archetype backend-node\n\
            \x20 monokit add billing-api -a node -f hono -l untyped --port 4000\n\
            \x20 monokit add ml-service  -a python -f fastapi --no-install\n\
            \x20 monokit add tooling     -a custom --dry-run"
    )]
    Add(AddArgs),

    /// Generate the project context from the design documents.
    #[command(
        about = "Generate docs/project-context.md",
        after_help = "EXAMPLES:\n\
            \x20 monokit init\n\
            \x20 monokit init --materials docs/specs --output docs/context.md"
    )]
    Init(InitArgs),

    /// Write a story draft.
    #[command(
        about = "Create a story draft",
        after_help = "EXAMPLES:\n\
            \x20 monokit story --title \"User login\"\n\
            \x20 monokit story --title \"Invoice export\" --app billing-api"
    )]
    Story(StoryArgs),

    /// List the apps already in the monorepo.
    #[command(visible_alias = "ls", about = "List existing apps")]
    Apps,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 monokit completions bash > ~/.local/share/bash-completion/completions/monokit\n\
            \x20 monokit completions zsh  > ~/.zfunc/_monokit\n\
            \x20 monokit completions fish > ~/.config/fish/completions/monokit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect or create the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 monokit config get workspace.apps_dir\n\
            \x20 monokit config list\n\
            \x20 monokit config init"
    )]
    Config(ConfigCommands),
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `monokit add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// App name: lowercase letters, digits and hyphens, starting with a letter.
    #[arg(value_name = "NAME", help = "App name (e.g. billing-api)")]
    pub name: String,

    #[arg(
        short = 'a',
        long = "archetype",
        value_name = "ARCHETYPE",
        help = "App archetype: backend-node, backend-python, frontend-web, frontend-mobile, custom"
    )]
    pub archetype: ArchetypeKind,

    /// Framework, or the variant for mobile apps.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Framework (express, fastify, hono, flask, fastapi, vite, nextjs, cra, bare, expo, expo-router)"
    )]
    pub framework: Option<String>,

    #[arg(
        short = 'l',
        long = "language",
        value_enum,
        value_name = "LANGUAGE",
        help = "Source language for node and web apps"
    )]
    pub language: Option<LanguageArg>,

    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        help = "Listening port, or 'auto' for the archetype default"
    )]
    pub port: Option<Port>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    #[arg(long = "no-install", help = "Skip installing dependencies")]
    pub no_install: bool,

    #[arg(long = "no-story", help = "Do not write the app's story draft")]
    pub no_story: bool,

    #[arg(
        long = "skip-context-check",
        help = "Do not require docs/project-context.md to exist"
    )]
    pub skip_context_check: bool,
}

/// Source language for archetypes with a JS/TS choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// TypeScript. Also accepted as `ts`.
    #[value(alias = "ts", alias = "typescript")]
    Typed,
    /// JavaScript. Also accepted as `js`.
    #[value(alias = "js", alias = "javascript")]
    Untyped,
}

impl From<LanguageArg> for LanguageMode {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Typed => LanguageMode::Typed,
            LanguageArg::Untyped => LanguageMode::Untyped,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `monokit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Override `docs.materials_dir`.
    #[arg(long = "materials", value_name = "DIR", help = "Design documents directory")]
    pub materials: Option<PathBuf>,

    /// Override `docs.context_file`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Where to write the project context"
    )]
    pub output: Option<PathBuf>,
}

// ── story ─────────────────────────────────────────────────────────────────────

/// Arguments for `monokit story`.
#[derive(Debug, Args)]
pub struct StoryArgs {
    #[arg(short = 't', long = "title", value_name = "TITLE", help = "Story title")]
    pub title: String,

    /// Empty or `shared` writes to the shared stories directory.
    #[arg(
        long = "app",
        value_name = "APP",
        default_value = "shared",
        help = "App the story belongs to, or 'shared'"
    )]
    pub app: String,

    #[arg(long = "overview", value_name = "TEXT", help = "One-paragraph overview")]
    pub overview: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `monokit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `monokit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `workspace.apps_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
    /// Write the default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "monokit",
            "add",
            "billing-api",
            "--archetype",
            "backend-node",
            "--framework",
            "hono",
            "--port",
            "4000",
            "--no-install",
        ]);
        let Commands::Add(args) = cli.command else {
            panic!("expected Add command");
        };
        assert_eq!(args.archetype, ArchetypeKind::BackendNode);
        assert_eq!(args.framework.as_deref(), Some("hono"));
        assert_eq!(args.port, Some(Port::Fixed(4000)));
        assert!(args.no_install);
        assert!(!args.dry_run);
    }

    #[test]
    fn archetype_aliases() {
        let cli = Cli::parse_from(["monokit", "add", "x", "-a", "python"]);
        let Commands::Add(args) = cli.command else {
            panic!("expected Add command");
        };
        assert_eq!(args.archetype, ArchetypeKind::BackendPython);
    }

    #[test]
    fn unknown_archetype_is_rejected() {
        assert!(Cli::try_parse_from(["monokit", "add", "x", "-a", "desktop"]).is_err());
    }

    #[test]
    fn language_aliases() {
        let cli = Cli::parse_from(["monokit", "add", "x", "-a", "node", "-l", "js"]);
        let Commands::Add(args) = cli.command else {
            panic!("expected Add command");
        };
        assert_eq!(args.language.map(LanguageMode::from), Some(LanguageMode::Untyped));
    }

    #[test]
    fn story_defaults_to_shared() {
        let cli = Cli::parse_from(["monokit", "story", "--title", "User login"]);
        let Commands::Story(args) = cli.command else {
            panic!("expected Story command");
        };
        assert_eq!(args.app, "shared");
        assert!(args.overview.is_none());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["monokit", "--quiet", "--verbose", "apps"]);
        assert!(result.is_err());
    }
}
