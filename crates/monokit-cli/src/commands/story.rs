//! `monokit story`: write a story draft.

use tracing::instrument;

use monokit_adapters::LocalFilesystem;
use monokit_core::{
    application::StoryService,
    domain::{StoryDraft, StoryScope},
};

use crate::{
    cli::{GlobalArgs, StoryArgs},
    config::{AppConfig, WorkspacePaths},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(title = %args.title))]
pub fn execute(
    args: StoryArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let paths = WorkspacePaths::resolve(&global, &config);
    let draft = StoryDraft {
        title: args.title.trim().to_string(),
        scope: StoryScope::from_input(&args.app)?,
        overview: args.overview.filter(|o| !o.trim().is_empty()),
    };

    let report = StoryService::new(Box::new(LocalFilesystem::new())).create_story(
        &draft,
        &paths.stories,
        &paths.apps_root,
        &super::today(),
    )?;

    output.json(&report)?;
    output.success(&format!(
        "Story '{}' created for {}",
        report.id,
        draft.scope.label()
    ))?;
    output.print(&format!("  {}", report.path.display()))?;
    Ok(())
}
