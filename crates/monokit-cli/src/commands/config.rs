//! `monokit config`: inspect and create configuration.

use std::path::PathBuf;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = target_path(&global);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;
            output.json(&serde_json::json!({ "key": key, "value": value }))?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.json(&config)?;
            output.header("Current Configuration:")?;
            output.print(&serialize(&config)?)?;
        }

        ConfigCommands::Path => {
            output.json(&serde_json::json!({ "path": path }))?;
            output.print(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }

            let toml = serialize(&AppConfig::default())?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_cli_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&path, &toml)
                .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

            output.json(&serde_json::json!({ "path": path, "written": true }))?;
            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// `--config` when given, otherwise the platform default.
fn target_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

fn serialize(config: &AppConfig) -> CliResult<String> {
    config.to_toml().map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
