//! Scaffold Service - write-path orchestrator.
//!
//! This service coordinates app generation:
//! 1. Resolve the template descriptor for the archetype
//! 2. Refuse to touch an existing app directory
//! 3. Render the whole tree in memory and validate it
//! 4. Write directories, then files with create-new semantics
//!
//! Nothing is written until steps 1-3 have succeeded. A failure during step 4
//! leaves the partial output in place; there is no automatic rollback.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DependencyInstaller, Filesystem},
    },
    domain::{AppName, AppRequest, GeneratedTree, RenderContext, TemplateRegistry, TreeEntry},
    error::MonokitResult,
};

/// What a successful scaffold wrote, in write order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaffoldReport {
    pub request: AppRequest,
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    installer: Option<Box<dyn DependencyInstaller>>,
}

impl ScaffoldService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            installer: None,
        }
    }

    /// Attach the installer used by [`install_dependencies`](Self::install_dependencies).
    pub fn with_installer(mut self, installer: Box<dyn DependencyInstaller>) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Directory an app with this name lives in.
    pub fn app_dir(apps_root: &Path, name: &AppName) -> PathBuf {
        apps_root.join(name.as_str())
    }

    /// Fail if `apps_root/<name>` already exists.
    pub fn check_collision(&self, name: &AppName, apps_root: &Path) -> MonokitResult<()> {
        let dir = Self::app_dir(apps_root, name);
        if self.filesystem.exists(&dir) {
            return Err(ApplicationError::AppExists { path: dir }.into());
        }
        Ok(())
    }

    /// Fail if the project context document has not been generated.
    pub fn require_context(&self, context_path: &Path) -> MonokitResult<()> {
        if self.filesystem.exists(context_path) {
            Ok(())
        } else {
            Err(ApplicationError::ContextMissing {
                path: context_path.to_path_buf(),
            }
            .into())
        }
    }

    /// Names of the apps already present under `apps_root`, sorted.
    #[instrument(skip(self), fields(apps_root = %apps_root.display()))]
    pub fn list_apps(&self, apps_root: &Path) -> MonokitResult<Vec<String>> {
        let apps = self.filesystem.list_dirs(apps_root)?;
        debug!(count = apps.len(), "existing apps listed");
        Ok(apps)
    }

    /// Render the tree for a request without touching the filesystem.
    #[instrument(skip_all, fields(app = %request.name(), archetype = %request.archetype().kind()))]
    pub fn preview(&self, request: &AppRequest, apps_root: &Path) -> MonokitResult<GeneratedTree> {
        let descriptor = TemplateRegistry::descriptor(request.archetype())?;
        let root = Self::app_dir(apps_root, request.name());
        let tree = descriptor.render(&RenderContext::new(request), root)?;
        debug!(entries = tree.entries().len(), "tree rendered");
        Ok(tree)
    }

    /// Scaffold a new app under `apps_root`.
    ///
    /// # Errors
    ///
    /// - `UnimplementedArchetype` before anything is checked or written
    /// - `AppExists` when the app directory is already present
    /// - `FilesystemError` on the first failed write (earlier writes remain)
    #[instrument(
        skip_all,
        fields(
            app = %request.name(),
            archetype = %request.archetype().kind(),
            apps_root = %apps_root.display()
        )
    )]
    pub fn scaffold(&self, request: &AppRequest, apps_root: &Path) -> MonokitResult<ScaffoldReport> {
        info!("Scaffolding {}", request);

        let descriptor = TemplateRegistry::descriptor(request.archetype())?;
        self.check_collision(request.name(), apps_root)?;

        let root = Self::app_dir(apps_root, request.name());
        let tree = descriptor.render(&RenderContext::new(request), &root)?;

        let report = self.write_tree(request, &tree).inspect_err(|e| {
            warn!(
                error = %e,
                root = %root.display(),
                "scaffold aborted; partial output left in place"
            );
        })?;

        info!(
            directories = report.directories.len(),
            files = report.files.len(),
            "Scaffold completed successfully"
        );
        Ok(report)
    }

    /// Run the configured installer at the workspace root.
    ///
    /// Returns `false` when no installer is attached.
    #[instrument(skip(self), fields(workspace_root = %workspace_root.display()))]
    pub fn install_dependencies(&self, workspace_root: &Path) -> MonokitResult<bool> {
        let Some(installer) = &self.installer else {
            debug!("no installer configured");
            return Ok(false);
        };
        info!(command = %installer.command_line(), "installing dependencies");
        installer.install(workspace_root)?;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_tree(&self, request: &AppRequest, tree: &GeneratedTree) -> MonokitResult<ScaffoldReport> {
        let root = tree.root();
        self.filesystem.create_dir_all(root)?;

        let mut report = ScaffoldReport {
            request: request.clone(),
            root: root.to_path_buf(),
            directories: Vec::new(),
            files: Vec::new(),
        };

        for entry in tree.entries() {
            let path = root.join(entry.path());
            match entry {
                TreeEntry::Directory(_) => {
                    self.filesystem.create_dir_all(&path)?;
                    report.directories.push(path);
                }
                TreeEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.create_file(&path, &file.content)?;
                    debug!(path = %path.display(), bytes = file.content.len(), "file written");
                    report.files.push(path);
                }
            }
        }

        Ok(report)
    }
}
