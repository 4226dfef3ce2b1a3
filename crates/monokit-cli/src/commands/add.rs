//! Implementation of the `monokit add` command.
//!
//! Responsibility: translate CLI arguments into an `AppRequest`, run the
//! write path (scaffold, merge, story, install) and display results. No
//! business logic lives here.

use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use monokit_adapters::{LocalFilesystem, PackageManagerInstaller};
use monokit_core::{
    application::{
        ApplicationError, ManifestService, MergeReport, ScaffoldReport, ScaffoldService,
        StoryReport, StoryService,
    },
    domain::{
        AppName, AppRequest, Archetype, ArchetypeKind, DomainError, GeneratedTree, LanguageMode,
        Port, ScriptSet, TreeEntry,
    },
};

use crate::{
    cli::{AddArgs, GlobalArgs},
    config::{AppConfig, WorkspacePaths},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// JSON summary of a completed `add`.
#[derive(Debug, Serialize)]
struct AddSummary {
    app: ScaffoldReport,
    manifest: MergeReport,
    story: Option<StoryReport>,
    installed: bool,
}

/// JSON summary of a dry run.
#[derive(Debug, Serialize)]
struct DryRunSummary<'a> {
    dry_run: bool,
    request: &'a AppRequest,
    root: PathBuf,
    directories: Vec<PathBuf>,
    files: Vec<PathBuf>,
    scripts: Vec<String>,
}

/// Execute the `monokit add` command.
///
/// Dispatch sequence:
/// 1. Validate the name and build the archetype from the flags
/// 2. Require the project context unless `--skip-context-check`
/// 3. Early-exit with a preview if `--dry-run`
/// 4. Scaffold the app, merge its scripts into the root manifest
/// 5. Write the story draft, install dependencies
#[instrument(skip_all, fields(app = %args.name))]
pub fn execute(
    args: AddArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let paths = WorkspacePaths::resolve(&global, &config);

    // 1. Build request
    let name = AppName::parse(&args.name)?;
    let archetype = build_archetype(&args)?;
    let request = AppRequest::new(name, archetype);
    debug!(request = %request, "Request resolved");

    let mut scaffold = ScaffoldService::new(Box::new(LocalFilesystem::new()));
    let install = config.install.enabled && !args.no_install && !args.dry_run;
    if install {
        scaffold = scaffold.with_installer(Box::new(PackageManagerInstaller::new(
            config.install.package_manager.clone(),
        )));
    }

    // 2. Preconditions
    if !args.skip_context_check {
        scaffold.require_context(&paths.context)?;
    }

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        scaffold.check_collision(request.name(), &paths.apps_root)?;
        let tree = scaffold.preview(&request, &paths.apps_root)?;
        return print_dry_run(&request, &tree, &output);
    }

    if !paths.manifest.is_file() {
        return Err(ApplicationError::ManifestNotFound {
            path: paths.manifest.clone(),
        }
        .into());
    }

    // 4. Scaffold + merge
    output.header(&format!("Adding '{}' ({})...", request.name(), request.archetype()))?;
    let report = scaffold.scaffold(&request, &paths.apps_root)?;
    output.success(&format!(
        "Created {} ({} files)",
        report.root.display(),
        report.files.len()
    ))?;

    let merge = ManifestService::new(Box::new(LocalFilesystem::new()))
        .merge(&paths.manifest, &request)?;
    if merge.written {
        output.success(&format!(
            "Updated {} scripts: {}",
            paths.manifest.display(),
            merge
                .entries
                .iter()
                .map(|e| e.key.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))?;
    } else {
        output.info("Root scripts already up to date")?;
    }

    // 5. Story + install
    let story = if args.no_story {
        None
    } else {
        let story = StoryService::new(Box::new(LocalFilesystem::new())).write_app_story(
            &request,
            &paths.stories,
            &super::today(),
        )?;
        output.success(&format!("Story draft: {}", story.path.display()))?;
        Some(story)
    };

    let installed = if install {
        output.info(&format!("Running {} install...", config.install.package_manager))?;
        match scaffold.install_dependencies(&paths.root) {
            Ok(done) => done,
            Err(e) => {
                // The app and its scripts are in place; installing is retryable.
                warn!(error = %e, "dependency installation failed");
                output.warning(&e.to_string())?;
                for suggestion in e.suggestions() {
                    output.print(&format!("  {suggestion}"))?;
                }
                false
            }
        }
    } else {
        false
    };

    info!(app = %request.name(), installed, "App added");

    output.json(&AddSummary {
        app: report,
        manifest: merge,
        story,
        installed,
    })?;

    let app = request.name();
    output.print("")?;
    output.print("Next steps:")?;
    if !installed {
        output.print(&format!("  {} install", config.install.package_manager))?;
    }
    output.print(&format!("  pnpm dev:{app}"))?;
    Ok(())
}

// ── Archetype construction ────────────────────────────────────────────────────

/// Combine `--archetype` with the option flags that apply to it.
fn build_archetype(args: &AddArgs) -> CliResult<Archetype> {
    let framework = args.framework.as_deref();
    let language = args.language.map(LanguageMode::from).unwrap_or_default();
    let port = args.port.unwrap_or(Port::Auto);

    let archetype = match args.archetype {
        ArchetypeKind::BackendNode => Archetype::BackendNode {
            framework: parse_or_default(framework)?,
            language,
            port,
        },
        ArchetypeKind::BackendPython => Archetype::BackendPython {
            framework: parse_or_default(framework)?,
            port,
        },
        ArchetypeKind::FrontendWeb => Archetype::FrontendWeb {
            framework: parse_or_default(framework)?,
            language,
            port,
        },
        ArchetypeKind::FrontendMobile => Archetype::FrontendMobile {
            variant: parse_or_default(framework)?,
        },
        ArchetypeKind::Custom => Archetype::Custom { port },
    };

    if framework.is_some() && archetype.framework_name().is_none() {
        return Err(not_applicable("--framework", args.archetype));
    }
    if args.language.is_some() && archetype.language().is_none() {
        return Err(not_applicable("--language", args.archetype));
    }
    if args.port.is_some() && archetype.port().is_none() {
        return Err(not_applicable("--port", args.archetype));
    }
    Ok(archetype)
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError> + Default,
{
    value.map_or_else(|| Ok(T::default()), T::from_str)
}

fn not_applicable(flag: &str, kind: ArchetypeKind) -> CliError {
    CliError::InvalidInput {
        message: format!("{flag} does not apply to {kind} apps"),
        suggestions: vec![format!("Remove {flag}, or pick a different --archetype")],
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn print_dry_run(request: &AppRequest, tree: &GeneratedTree, out: &OutputManager) -> CliResult<()> {
    let root = tree.root().to_path_buf();
    let mut directories = Vec::new();
    let mut files = Vec::new();
    for entry in tree.entries() {
        let path = root.join(entry.path());
        match entry {
            TreeEntry::Directory(_) => directories.push(path),
            TreeEntry::File(_) => files.push(path),
        }
    }
    let scripts: Vec<String> = ScriptSet::for_app(request)
        .entries()
        .iter()
        .map(|e| e.key.clone())
        .collect();

    out.info(&format!(
        "Dry run: would create '{}' at {}",
        request.name(),
        root.display()
    ))?;
    out.print(&format!("  Archetype: {}", request.archetype()))?;
    for file in &files {
        out.print(&format!("  + {}", file.display()))?;
    }
    out.print(&format!("  Scripts:   {}", scripts.join(", ")))?;

    out.json(&DryRunSummary {
        dry_run: true,
        request,
        root,
        directories,
        files,
        scripts,
    })?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
