//! Manifest Service - read-modify-write of the shared root manifest.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{AppRequest, Manifest, ManifestEntry, MergeOutcome, ScriptSet},
    error::MonokitResult,
};

/// Result of merging one app's scripts into the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    pub path: PathBuf,
    pub entries: Vec<ManifestEntry>,
    pub outcome: MergeOutcome,
    /// False when every script was already present with the same command.
    pub written: bool,
}

pub struct ManifestService {
    filesystem: Box<dyn Filesystem>,
}

impl ManifestService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Upsert the app's scripts into the manifest at `manifest_path`.
    ///
    /// Idempotent: a second merge of the same request reports every key as
    /// unchanged and leaves the file untouched.
    ///
    /// # Errors
    ///
    /// - `ManifestNotFound` when the file does not exist
    /// - `ManifestInvalid` when it is not a JSON object
    #[instrument(skip_all, fields(app = %request.name(), manifest = %manifest_path.display()))]
    pub fn merge(&self, manifest_path: &Path, request: &AppRequest) -> MonokitResult<MergeReport> {
        if !self.filesystem.exists(manifest_path) {
            return Err(ApplicationError::ManifestNotFound {
                path: manifest_path.to_path_buf(),
            }
            .into());
        }

        let raw = self.filesystem.read_to_string(manifest_path)?;
        let mut manifest = Manifest::parse(&raw)?;
        let scripts = ScriptSet::for_app(request);
        let outcome = manifest.upsert_scripts(scripts.entries())?;

        let written = !outcome.is_noop();
        if written {
            self.filesystem
                .write_file(manifest_path, &manifest.to_pretty_string()?)?;
            info!(
                added = outcome.added.len(),
                updated = outcome.updated.len(),
                "manifest updated"
            );
        } else {
            debug!("manifest already up to date");
        }

        Ok(MergeReport {
            path: manifest_path.to_path_buf(),
            entries: scripts.entries().to_vec(),
            outcome,
            written,
        })
    }
}
