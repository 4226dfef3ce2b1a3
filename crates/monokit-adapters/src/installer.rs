//! Package-manager installer adapter.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use monokit_core::{
    application::{ApplicationError, ports::DependencyInstaller},
    error::MonokitResult,
};

/// Runs `<program> install` in the workspace root.
#[derive(Debug, Clone)]
pub struct PackageManagerInstaller {
    program: String,
}

impl PackageManagerInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for PackageManagerInstaller {
    fn default() -> Self {
        Self::new("pnpm")
    }
}

impl DependencyInstaller for PackageManagerInstaller {
    fn install(&self, workspace_root: &Path) -> MonokitResult<()> {
        info!(command = %self.command_line(), root = %workspace_root.display(), "Installing dependencies");

        let status = Command::new(&self.program)
            .arg("install")
            .current_dir(workspace_root)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| ApplicationError::InstallFailed {
                command: self.command_line(),
                reason: format!("could not start: {e}"),
            })?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(ApplicationError::InstallFailed {
                command: self.command_line(),
                reason,
            }
            .into());
        }

        debug!("Install finished");
        Ok(())
    }

    fn command_line(&self) -> String {
        format!("{} install", self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monokit_core::error::MonokitError;
    use tempfile::TempDir;

    #[test]
    fn command_line_names_program() {
        assert_eq!(PackageManagerInstaller::default().command_line(), "pnpm install");
        assert_eq!(PackageManagerInstaller::new("npm").command_line(), "npm install");
    }

    #[test]
    fn missing_program_is_install_failure() {
        let temp = TempDir::new().unwrap();
        let installer = PackageManagerInstaller::new("monokit-no-such-package-manager");

        let err = installer.install(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            MonokitError::Application(ApplicationError::InstallFailed { .. })
        ));
        assert!(err.to_string().contains("monokit-no-such-package-manager install"));
    }
}
