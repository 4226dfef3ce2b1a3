//! `monokit apps`: list the apps already in the monorepo.

use serde::Serialize;
use tracing::instrument;

use monokit_adapters::LocalFilesystem;
use monokit_core::application::ScaffoldService;

use crate::{
    cli::GlobalArgs,
    config::{AppConfig, WorkspacePaths},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct AppsListing<'a> {
    apps_root: &'a std::path::Path,
    apps: &'a [String],
}

#[instrument(skip_all)]
pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let paths = WorkspacePaths::resolve(&global, &config);
    let apps = ScaffoldService::new(Box::new(LocalFilesystem::new())).list_apps(&paths.apps_root)?;

    output.json(&AppsListing {
        apps_root: &paths.apps_root,
        apps: &apps,
    })?;

    if apps.is_empty() {
        output.info(&format!("No apps in {}", paths.apps_root.display()))?;
        return Ok(());
    }

    output.header(&format!("Apps in {}", paths.apps_root.display()))?;
    for app in &apps {
        output.print(&format!("  {app}"))?;
    }
    Ok(())
}
