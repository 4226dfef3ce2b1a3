//! Integration tests for monokit-core, wired to the real adapters.

use std::fs;
use std::path::Path;

use monokit_adapters::{LocalFilesystem, MemoryFilesystem};
use monokit_core::{
    application::ApplicationError,
    domain::{DomainError, LanguageMode, NodeFramework, Port, ProjectDomain, PythonFramework},
    error::{ErrorCategory, MonokitError},
    prelude::*,
};
use tempfile::TempDir;

const ROOT_MANIFEST: &str = r#"{
  "name": "acme",
  "private": true,
  "scripts": {
    "lint": "eslint ."
  },
  "devDependencies": {
    "prettier": "^3.0.0"
  }
}
"#;

fn node_request(name: &str) -> AppRequest {
    AppRequest::new(
        AppName::parse(name).unwrap(),
        Archetype::BackendNode {
            framework: NodeFramework::Fastify,
            language: LanguageMode::Typed,
            port: Port::Fixed(4000),
        },
    )
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_saas_postgres_context_end_to_end() {
    let temp = TempDir::new().unwrap();
    let ws = temp.path();
    let materials = ws.join("docs/project-materials");
    write(
        &materials,
        "requirements/prd.md",
        "Each tenant gets a workspace with a subscription dashboard.",
    );
    write(
        &materials,
        "architecture/stack.md",
        "API in Node with Express, data in Postgres.",
    );
    write(&materials, "README.md", "How to use this folder: payment wallet");
    write(&materials, "requirements/EXAMPLE-prd.md", "patient doctor clinic");

    let service = AnalysisService::new(Box::new(LocalFilesystem::new())).with_cite_root(ws);
    let context = ws.join("docs/project-context.md");
    let report = service
        .generate_context(&materials, &context, "2026-10-17")
        .unwrap();

    assert_eq!(report.analysis.domain, ProjectDomain::Saas);
    assert_eq!(report.documents_found, 4);
    assert_eq!(report.documents_analyzed, 2);

    let text = fs::read_to_string(&context).unwrap();
    assert!(text.contains("> Generated: 2026-10-17"));
    assert!(text.contains("### Domain\nSaas"));
    assert!(text.contains("- Node.js"));
    assert!(text.contains("- PostgreSQL"));
    assert!(text.contains("- docs/project-materials/requirements/prd.md"));
    assert!(!text.contains("EXAMPLE-prd.md"));
    assert!(!text.contains("No requirements documentation provided"));
    assert!(text.contains("No Frontend technology detected"));
}

#[test]
fn test_empty_materials_render_only_warnings() {
    let temp = TempDir::new().unwrap();
    let materials = temp.path().join("docs/project-materials");
    write(&materials, "README.md", "placeholder");
    write(&materials, "requirements/.gitkeep.md", "");

    let service = AnalysisService::new(Box::new(LocalFilesystem::new()));
    let report = service
        .generate_context(&materials, &temp.path().join("docs/project-context.md"), "2026-10-17")
        .unwrap();

    assert_eq!(report.documents_analyzed, 0);
    assert_eq!(report.analysis.domain, ProjectDomain::General);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("No requirements documentation provided"))
    );
}

#[test]
fn test_non_utf8_document_does_not_abort_analysis() {
    let temp = TempDir::new().unwrap();
    let materials = temp.path().join("docs/project-materials");
    write(&materials, "requirements/prd.md", "Users pay from a wallet; every payment is logged.");
    fs::write(materials.join("requirements/legacy.md"), [0x63, 0x61, 0x66, 0xE9]).unwrap();

    let report = AnalysisService::new(Box::new(LocalFilesystem::new()))
        .generate_context(&materials, &temp.path().join("docs/project-context.md"), "2026-10-17")
        .unwrap();

    assert_eq!(report.analysis.domain, ProjectDomain::Fintech);
    assert_eq!(report.documents_analyzed, 2);
}

#[test]
fn test_missing_materials_root_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = AnalysisService::new(Box::new(LocalFilesystem::new()))
        .generate_context(
            &temp.path().join("docs/project-materials"),
            &temp.path().join("docs/project-context.md"),
            "2026-10-17",
        )
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(!temp.path().join("docs/project-context.md").exists());
}

#[test]
fn test_scaffold_node_app_on_disk() {
    let temp = TempDir::new().unwrap();
    let apps = temp.path().join("apps");
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    let report = service.scaffold(&node_request("billing-api"), &apps).unwrap();

    let root = apps.join("billing-api");
    assert_eq!(report.root, root);
    assert!(root.join("tsconfig.json").is_file());
    assert!(root.join("src/controllers/health-controller.ts").is_file());
    assert!(root.join("tests/health.test.ts").is_file());
    assert!(root.join("src/models").is_dir());

    let config = fs::read_to_string(root.join("src/config/index.ts")).unwrap();
    assert!(config.contains("4000"));
    for file in &report.files {
        let content = fs::read_to_string(file).unwrap();
        assert!(!content.contains("{{"), "unrendered placeholder in {}", file.display());
    }
}

#[test]
fn test_scaffold_is_deterministic() {
    let request = AppRequest::new(
        AppName::parse("ml-service").unwrap(),
        Archetype::BackendPython {
            framework: PythonFramework::FastApi,
            port: Port::Auto,
        },
    );

    let first = MemoryFilesystem::new();
    let second = MemoryFilesystem::new();
    ScaffoldService::new(Box::new(first.clone()))
        .scaffold(&request, Path::new("/ws/apps"))
        .unwrap();
    ScaffoldService::new(Box::new(second.clone()))
        .scaffold(&request, Path::new("/ws/apps"))
        .unwrap();

    let files = first.list_files();
    assert_eq!(files, second.list_files());
    for path in &files {
        assert_eq!(first.read_file(path), second.read_file(path), "{}", path.display());
    }
}

#[test]
fn test_existing_app_is_never_written_into() {
    let fs = MemoryFilesystem::new().with_file("/ws/apps/billing-api/notes.txt", "mine");
    let service = ScaffoldService::new(Box::new(fs.clone()));

    let err = service
        .scaffold(&node_request("billing-api"), Path::new("/ws/apps"))
        .unwrap_err();

    assert!(matches!(
        err,
        MonokitError::Application(ApplicationError::AppExists { .. })
    ));
    assert_eq!(fs.list_files().len(), 1);
    assert_eq!(fs.read_file("/ws/apps/billing-api/notes.txt").as_deref(), Some("mine"));
}

#[test]
fn test_unimplemented_archetype_leaves_no_state() {
    let fs = MemoryFilesystem::new().with_file("/ws/package.json", ROOT_MANIFEST);
    let service = ScaffoldService::new(Box::new(fs.clone()));
    let request = AppRequest::new(
        AppName::parse("storefront").unwrap(),
        Archetype::default_for(ArchetypeKind::FrontendWeb),
    );

    let err = service.scaffold(&request, Path::new("/ws/apps")).unwrap_err();

    assert!(matches!(
        err,
        MonokitError::Domain(DomainError::UnimplementedArchetype { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Unimplemented);
    assert!(!fs.exists(Path::new("/ws/apps")));
    assert_eq!(fs.list_files(), vec![Path::new("/ws/package.json").to_path_buf()]);
}

#[test]
fn test_preview_writes_nothing() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Box::new(fs.clone()));

    let tree = service
        .preview(&node_request("billing-api"), Path::new("/ws/apps"))
        .unwrap();

    assert!(tree.file("package.json").is_some());
    assert!(fs.list_files().is_empty());
    assert!(!fs.exists(Path::new("/ws/apps")));
}

#[test]
fn test_manifest_merge_twice_is_identical() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("package.json");
    fs::write(&manifest, ROOT_MANIFEST).unwrap();
    let service = ManifestService::new(Box::new(LocalFilesystem::new()));
    let request = node_request("billing-api");

    let first = service.merge(&manifest, &request).unwrap();
    let after_first = fs::read_to_string(&manifest).unwrap();
    let second = service.merge(&manifest, &request).unwrap();
    let after_second = fs::read_to_string(&manifest).unwrap();

    assert!(first.written);
    assert_eq!(
        first.outcome.added,
        [
            "dev:billing-api",
            "build:billing-api",
            "test:billing-api",
            "typecheck:billing-api"
        ]
    );
    assert!(!second.written);
    assert_eq!(second.outcome.unchanged.len(), 4);
    assert_eq!(after_first, after_second);

    // Unrelated keys keep their place.
    let lint = after_first.find("\"lint\"").unwrap();
    let dev = after_first.find("\"dev:billing-api\"").unwrap();
    let dev_deps = after_first.find("\"devDependencies\"").unwrap();
    assert!(lint < dev && dev < dev_deps);
    assert!(after_first.ends_with("}\n"));
}

#[test]
fn test_missing_manifest_is_not_found() {
    let service = ManifestService::new(Box::new(MemoryFilesystem::new()));
    let err = service
        .merge(Path::new("/ws/package.json"), &node_request("billing-api"))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

#[test]
fn test_stories_land_in_scope_directories() {
    let fs = MemoryFilesystem::new();
    let service = StoryService::new(Box::new(fs.clone()));
    let stories = Path::new("/ws/docs/stories");
    let apps = Path::new("/ws/apps");

    let app_story = service
        .write_app_story(&node_request("billing-api"), stories, "2026-10-17")
        .unwrap();
    assert_eq!(app_story.path, stories.join("add-billing-api-app.md"));

    let draft = StoryDraft {
        title: "Invoice PDF export!".into(),
        scope: StoryScope::from_input("billing-api").unwrap(),
        overview: None,
    };
    let scoped = service
        .create_story(&draft, stories, apps, "2026-10-17")
        .unwrap();
    assert_eq!(
        scoped.path,
        Path::new("/ws/apps/billing-api/docs/stories/invoice-pdf-export.md")
    );

    let again = service.create_story(&draft, stories, apps, "2026-10-17");
    assert!(again.is_err());
}
