//! Project context rendering.
//!
//! Turns an [`AnalysisResult`] plus the classified corpus into the markdown
//! document downstream tooling reads. Rendering is pure: the generation date
//! and source label come in through [`ReportOptions`].
//!
//! Sections with no contributing documents render a warning line starting
//! with [`WARNING_MARKER`] instead of an empty heading. Downstream consumers
//! scan for that marker, so its wording is part of the output contract.

use serde::Serialize;

use crate::domain::{
    entities::document::{Corpus, DocCategory, DocumentRecord},
    signals::{AnalysisResult, StackDimension},
};

/// Prefix of every "missing documentation" line.
pub const WARNING_MARKER: &str = "⚠️";

const RULE: &str = "---\n\n";

/// Inputs that are not derived from the documents themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// ISO date (`YYYY-MM-DD`) stamped into the header.
    pub generated_on: String,
    /// Document root as it should be cited, with a trailing slash.
    pub source_label: String,
}

impl ReportOptions {
    pub fn new(generated_on: impl Into<String>, source_label: impl Into<String>) -> Self {
        let mut source_label = source_label.into();
        if !source_label.ends_with('/') {
            source_label.push('/');
        }
        Self {
            generated_on: generated_on.into(),
            source_label,
        }
    }
}

/// The rendered project context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextDocument {
    text: String,
}

impl ContextDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Every warning line, without the marker.
    pub fn warnings(&self) -> Vec<&str> {
        self.text
            .lines()
            .filter_map(|l| l.strip_prefix(WARNING_MARKER))
            .map(|l| l.trim().trim_matches('*'))
            .collect()
    }
}

fn warning(out: &mut String, text: &str) {
    out.push_str(&format!("{WARNING_MARKER} **{text}**\n\n"));
}

fn bullet_paths<'a>(out: &mut String, docs: impl Iterator<Item = &'a DocumentRecord>) {
    for doc in docs {
        out.push_str(&format!("- {}\n", doc.display_path()));
    }
    out.push('\n');
}

/// Render the full context document.
///
/// Section order is fixed: overview, technology stack, architecture patterns,
/// coding conventions, infrastructure, development workflow, design system,
/// notes.
pub fn render_context(
    analysis: &AnalysisResult,
    corpus: &Corpus,
    options: &ReportOptions,
) -> ContextDocument {
    let mut out = String::new();
    let counts = &analysis.counts;
    let source = &options.source_label;

    out.push_str("# Project Context\n\n");
    out.push_str(&format!("> Generated: {}\n", options.generated_on));
    out.push_str(&format!("> Source: User documentation in {source}\n"));
    out.push_str("> Generator: monokit init\n\n");
    out.push_str(RULE);

    // ── Overview ─────────────────────────────────────────────────────────
    out.push_str("## Project Overview\n\n");
    if counts.requirements > 0 {
        out.push_str(&format!(
            "### Domain\n{}\n\n",
            analysis.domain.display_name()
        ));
        out.push_str("### Documentation Analyzed\n");
        bullet_paths(&mut out, corpus.by_category(DocCategory::Requirements));
    } else {
        warning(&mut out, "No requirements documentation provided");
    }
    out.push_str(RULE);

    // ── Technology stack ─────────────────────────────────────────────────
    out.push_str("## Technology Stack\n\n");
    for dimension in StackDimension::ALL {
        let labels = analysis.tech_stack.get(dimension);
        if labels.is_empty() {
            continue;
        }
        out.push_str(&format!("### {}\n", dimension.title()));
        for label in labels {
            out.push_str(&format!("- {label}\n"));
        }
        out.push('\n');
    }
    for dimension in StackDimension::ALL {
        if analysis.tech_stack.get(dimension).is_empty() {
            warning(
                &mut out,
                &format!("No {} technology detected", dimension.title()),
            );
        }
    }
    if counts.architecture == 0 {
        warning(&mut out, "No architecture documentation provided");
        out.push_str("Please add technology decisions to:\n");
        out.push_str(&format!("{source}architecture/tech-stack.md\n\n"));
    }
    out.push_str(RULE);

    // ── Architecture patterns ────────────────────────────────────────────
    out.push_str("## Architecture Patterns\n\n");
    if counts.architecture > 0 {
        out.push_str("Based on architecture documentation in:\n");
        bullet_paths(&mut out, corpus.by_category(DocCategory::Architecture));
    } else {
        warning(&mut out, "No architecture patterns documented");
    }
    out.push_str(RULE);

    // ── Coding conventions ───────────────────────────────────────────────
    out.push_str(CODING_CONVENTIONS);
    out.push_str(RULE);

    // ── Infrastructure ───────────────────────────────────────────────────
    out.push_str("## Infrastructure & Deployment\n\n");
    if counts.infrastructure > 0 {
        out.push_str("Infrastructure decisions documented in:\n");
        bullet_paths(&mut out, corpus.by_category(DocCategory::Infrastructure));
    } else {
        warning(&mut out, "No infrastructure documentation provided");
        out.push_str("Consider adding:\n");
        out.push_str("- Database choice and rationale\n");
        out.push_str("- Hosting and deployment strategy\n");
        out.push_str("- CI/CD approach\n\n");
    }
    out.push_str(RULE);

    // ── Workflow ─────────────────────────────────────────────────────────
    out.push_str(DEVELOPMENT_WORKFLOW);
    out.push_str(RULE);

    // ── Design ───────────────────────────────────────────────────────────
    out.push_str("## Design System\n\n");
    if counts.design > 0 {
        out.push_str("Design specifications documented in:\n");
        bullet_paths(&mut out, corpus.by_category(DocCategory::Design));
    } else {
        warning(&mut out, "No design documentation provided");
    }
    out.push_str(RULE);

    // ── Notes ────────────────────────────────────────────────────────────
    out.push_str("## Notes\n\n");
    out.push_str("### Documentation Coverage\n");
    for category in DocCategory::CLASSIFIED {
        out.push_str(&format!(
            "- {}: {} file(s)\n",
            category.title(),
            counts.get(category)
        ));
    }
    if counts.unclassified > 0 {
        out.push_str(&format!(
            "- Unclassified (not analyzed): {} file(s)\n",
            counts.unclassified
        ));
    }
    out.push('\n');
    out.push_str(RECOMMENDATIONS);

    ContextDocument { text: out }
}

const CODING_CONVENTIONS: &str = "## Coding Conventions

### Naming Conventions
- **Files:** kebab-case (enforced by template)
- **Variables:** camelCase (JavaScript/TypeScript)
- **Constants:** UPPER_SNAKE_CASE
- **Components:** kebab-case

### File Structure
- Monorepo with PNPM workspaces
- Apps in `apps/` directory
- Shared packages in `packages/` directory

### Code Style
- ESLint configuration: See `.eslintrc.json`
- Prettier configuration: See `.prettierrc`

";

const DEVELOPMENT_WORKFLOW: &str = "## Development Workflow

### Testing Requirements
- Unit tests for all business logic
- Integration tests for API endpoints
- E2E tests for critical user flows

### Code Review
- All changes via pull requests
- Stories live in `docs/stories/` and drive each change

### Documentation
- Update docs/ as features are built
- Maintain README for each app/package

";

const RECOMMENDATIONS: &str = "### Recommendations
1. Review this context file and add missing information
2. Update as the project evolves by re-running `monokit init`
3. Treat this file as the reference for all automated workflows

### Conventions from Template
This template enforces:
- kebab-case file naming
- PNPM workspace monorepo
- Domain-agnostic structure

---

**This document guides all AI-assisted development work.**
**Update as your project evolves!**
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signals::analyze;
    use std::path::Path;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        Corpus {
            all: docs.iter().map(|(p, _)| p.into()).collect(),
            content: docs
                .iter()
                .map(|(p, c)| DocumentRecord::new(*p, Path::new(p), (*c).to_string()))
                .collect(),
        }
    }

    fn options() -> ReportOptions {
        ReportOptions::new("2026-01-15", "docs/project-materials")
    }

    fn render(docs: &[(&str, &str)]) -> String {
        let c = corpus(docs);
        render_context(&analyze(&c), &c, &options()).into_string()
    }

    #[test]
    fn source_label_gets_trailing_slash() {
        assert_eq!(options().source_label, "docs/project-materials/");
    }

    #[test]
    fn empty_corpus_renders_every_warning() {
        let doc = render(&[]);
        for missing in [
            "No requirements documentation provided",
            "No Backend technology detected",
            "No Database technology detected",
            "No architecture documentation provided",
            "No architecture patterns documented",
            "No infrastructure documentation provided",
            "No design documentation provided",
        ] {
            assert!(doc.contains(missing), "missing warning: {missing}");
        }
        assert!(doc.contains("- Requirements: 0 file(s)"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let doc = render(&[("requirements/prd.md", "payment wallet")]);
        let order = [
            "## Project Overview",
            "## Technology Stack",
            "## Architecture Patterns",
            "## Coding Conventions",
            "## Infrastructure & Deployment",
            "## Development Workflow",
            "## Design System",
            "## Notes",
        ];
        let positions: Vec<usize> = order.iter().map(|h| doc.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn overview_cites_requirement_paths_and_domain() {
        let doc = render(&[("requirements/prd.md", "payment wallet")]);
        assert!(doc.contains("### Domain\nFintech\n"));
        assert!(doc.contains("- requirements/prd.md\n"));
        assert!(!doc.contains("No requirements documentation provided"));
    }

    #[test]
    fn saas_with_postgres_warns_only_for_missing_dimensions() {
        let c = corpus(&[
            ("requirements/prd.md", "Subscription plans per tenant"),
            ("architecture/stack.md", "Primary store: Postgres 16"),
        ]);
        let doc = render_context(&analyze(&c), &c, &options());
        let text = doc.as_str();

        assert!(text.contains("### Database\n- PostgreSQL\n"));
        assert!(text.contains("No Backend technology detected"));
        assert!(text.contains("No Frontend technology detected"));
        assert!(text.contains("No Mobile technology detected"));
        assert!(!text.contains("No Database technology detected"));
        assert!(!text.contains("No architecture documentation provided"));

        let warnings = doc.warnings();
        assert!(warnings.contains(&"No Backend technology detected"));
    }

    #[test]
    fn unclassified_count_only_when_present() {
        let without = render(&[("design/ui.md", "x")]);
        assert!(!without.contains("Unclassified"));

        let with = render(&[("notes/ideas.md", "x")]);
        assert!(with.contains("- Unclassified (not analyzed): 1 file(s)"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let docs = [
            ("requirements/prd.md", "student course"),
            ("architecture/a.md", "react and node"),
        ];
        assert_eq!(render(&docs), render(&docs));
    }
}
