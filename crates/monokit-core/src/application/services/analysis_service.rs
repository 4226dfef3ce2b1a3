//! Analysis Service - analyze-path orchestrator.
//!
//! Scans a document root, classifies what it finds, extracts signals and
//! writes the rendered project context.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        AnalysisResult, ContextDocument, Corpus, DocumentRecord, ReportOptions, analyze,
        is_non_content, render_context,
    },
    error::MonokitResult,
};

/// Outcome of generating the context document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextReport {
    pub path: PathBuf,
    pub analysis: AnalysisResult,
    pub documents_found: usize,
    pub documents_analyzed: usize,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub document: ContextDocument,
}

pub struct AnalysisService {
    filesystem: Box<dyn Filesystem>,
    cite_root: Option<PathBuf>,
}

impl AnalysisService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            cite_root: None,
        }
    }

    /// Cite document paths relative to `root` (normally the workspace root).
    pub fn with_cite_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cite_root = Some(root.into());
        self
    }

    fn cite(&self, path: &Path) -> PathBuf {
        self.cite_root
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path)
            .to_path_buf()
    }

    /// Scan `root` and classify every markdown file below it.
    ///
    /// Scaffolding files (readmes, examples, placeholders) are listed in
    /// `Corpus::all` but left out of the content set. Classification only looks
    /// at the part of the path below `root`.
    ///
    /// # Errors
    ///
    /// `RootNotFound` when `root` is not a directory.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn classify(&self, root: &Path) -> MonokitResult<Corpus> {
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::RootNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut corpus = Corpus::default();
        for path in self.filesystem.list_markdown(root)? {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            if is_non_content(&relative) {
                debug!(path = %path.display(), "skipping scaffolding file");
            } else {
                let content = self.filesystem.read_to_string_lossy(&path)?;
                let record = DocumentRecord::new(self.cite(&path), &relative, content);
                debug!(path = %path.display(), category = %record.category, "classified");
                corpus.content.push(record);
            }
            corpus.all.push(path);
        }

        info!(
            found = corpus.all.len(),
            content = corpus.content.len(),
            "documents classified"
        );
        Ok(corpus)
    }

    /// Classify `root` and extract domain and stack signals.
    pub fn analyze(&self, root: &Path) -> MonokitResult<(Corpus, AnalysisResult)> {
        let corpus = self.classify(root)?;
        let analysis = analyze(&corpus);
        debug!(domain = %analysis.domain, "signals extracted");
        Ok((corpus, analysis))
    }

    /// Analyze `materials_root` and write the context document to `context_path`.
    ///
    /// An empty corpus is not an error: the document is still written, made of
    /// warnings.
    #[instrument(
        skip(self),
        fields(root = %materials_root.display(), output = %context_path.display())
    )]
    pub fn generate_context(
        &self,
        materials_root: &Path,
        context_path: &Path,
        generated_on: &str,
    ) -> MonokitResult<ContextReport> {
        let (corpus, analysis) = self.analyze(materials_root)?;
        if corpus.is_empty() {
            warn!("no user documents found; context will consist of warnings");
        }

        let source_label = self.cite(materials_root).to_string_lossy().replace('\\', "/");
        let options = ReportOptions::new(generated_on, source_label);
        let document = render_context(&analysis, &corpus, &options);

        if let Some(parent) = context_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(context_path, document.as_str())?;
        info!(path = %context_path.display(), "context written");

        Ok(ContextReport {
            path: context_path.to_path_buf(),
            documents_found: corpus.all.len(),
            documents_analyzed: corpus.content.len(),
            warnings: document.warnings().into_iter().map(String::from).collect(),
            analysis,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockFilesystem;
    use crate::domain::{DocCategory, ProjectDomain};
    use crate::error::ErrorCategory;

    fn fs_with_docs(docs: &'static [(&'static str, &'static str)]) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_list_markdown()
            .returning(move |_| Ok(docs.iter().map(|(p, _)| PathBuf::from(p)).collect()));
        fs.expect_read_to_string_lossy().returning(move |path| {
            Ok(docs
                .iter()
                .find(|(p, _)| Path::new(p) == path)
                .map(|(_, c)| c.to_string())
                .unwrap_or_default())
        });
        fs
    }

    #[test]
    fn missing_root_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        let err = AnalysisService::new(Box::new(fs))
            .classify(Path::new("/ws/docs/project-materials"))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn scaffolding_files_are_listed_but_not_analyzed() {
        static DOCS: [(&str, &str); 4] = [
            ("/ws/docs/m/README.md", "payment wallet"),
            ("/ws/docs/m/requirements/EXAMPLE-prd.md", "payment wallet"),
            ("/ws/docs/m/requirements/prd.md", "student course"),
            ("/ws/docs/m/notes/ideas.md", "misc"),
        ];
        let service =
            AnalysisService::new(Box::new(fs_with_docs(&DOCS))).with_cite_root("/ws");
        let corpus = service.classify(Path::new("/ws/docs/m")).unwrap();

        assert_eq!(corpus.all.len(), 4);
        assert_eq!(corpus.content.len(), 2);
        assert_eq!(corpus.count(DocCategory::Requirements), 1);
        assert_eq!(corpus.count(DocCategory::Unclassified), 1);
        assert_eq!(
            corpus.content[0].path,
            PathBuf::from("docs/m/requirements/prd.md")
        );
    }

    #[test]
    fn root_segments_do_not_affect_classification() {
        static DOCS: [(&str, &str); 1] = [("/srv/design/docs/notes.md", "x")];
        let service = AnalysisService::new(Box::new(fs_with_docs(&DOCS)));
        let corpus = service.classify(Path::new("/srv/design/docs")).unwrap();
        assert_eq!(corpus.content[0].category, DocCategory::Unclassified);
    }

    #[test]
    fn context_is_written_even_for_an_empty_corpus() {
        static DOCS: [(&str, &str); 0] = [];
        let mut fs = fs_with_docs(&DOCS);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, body| {
                path == Path::new("/ws/docs/project-context.md")
                    && body.contains("No requirements documentation provided")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = AnalysisService::new(Box::new(fs))
            .with_cite_root("/ws")
            .generate_context(
                Path::new("/ws/docs/project-materials"),
                Path::new("/ws/docs/project-context.md"),
                "2026-02-01",
            )
            .unwrap();

        assert_eq!(report.analysis.domain, ProjectDomain::General);
        assert_eq!(report.documents_analyzed, 0);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w == "No architecture documentation provided")
        );
        assert!(
            report
                .document
                .as_str()
                .contains("> Source: User documentation in docs/project-materials/")
        );
    }
}
