//! `monokit init`: generate the project context from the design documents.

use tracing::instrument;

use monokit_adapters::LocalFilesystem;
use monokit_core::{
    application::AnalysisService,
    domain::{DocCategory, StackDimension},
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, WorkspacePaths},
    error::CliResult,
    output::OutputManager,
};

/// Analyze `docs.materials_dir` and write `docs.context_file`.
///
/// A corpus with no usable documents still produces a context file made of
/// warnings; the command succeeds and prints what to add.
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let paths = WorkspacePaths::resolve(&global, &config);
    let materials = args
        .materials
        .map_or(paths.materials, |p| paths.root.join(p));
    let context = args.output.map_or(paths.context, |p| paths.root.join(p));

    output.header("Analyzing project documentation...")?;

    let service =
        AnalysisService::new(Box::new(LocalFilesystem::new())).with_cite_root(&paths.root);
    let report = service.generate_context(&materials, &context, &super::today())?;

    output.json(&report)?;

    if report.documents_analyzed == 0 {
        output.warning("No project documentation found")?;
        output.print("")?;
        output.print(&format!("Add your documents under {}:", materials.display()))?;
        output.print("  requirements/    PRD, requirements or feature list (required)")?;
        output.print("  architecture/    tech stack decisions (required)")?;
        output.print("  design/          design system notes")?;
        output.print("  infrastructure/  hosting, database, CI/CD")?;
        output.print("")?;
        output.print("Then run `monokit init` again.")?;
        return Ok(());
    }

    output.success(&format!(
        "Analyzed {} of {} documents",
        report.documents_analyzed, report.documents_found
    ))?;
    let counts = &report.analysis.counts;
    for category in DocCategory::CLASSIFIED {
        output.print(&format!("  {:<15} {}", category.title(), counts.get(category)))?;
    }
    if counts.unclassified > 0 {
        output.print(&format!("  {:<15} {}", "Unclassified", counts.unclassified))?;
    }

    output.print("")?;
    output.print(&format!(
        "  Domain: {}",
        report.analysis.domain.display_name()
    ))?;
    for dimension in StackDimension::ALL {
        let labels = report.analysis.tech_stack.get(dimension);
        if !labels.is_empty() {
            output.print(&format!("  {}: {}", dimension.title(), labels.join(", ")))?;
        }
    }

    if !report.warnings.is_empty() {
        output.print("")?;
        for warning in &report.warnings {
            output.warning(warning)?;
        }
    }

    output.print("")?;
    output.success(&format!("Generated {}", report.path.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print("  Review the context and adjust anything the analysis missed")?;
    output.print("  monokit add <name> --archetype backend-node")?;
    Ok(())
}
