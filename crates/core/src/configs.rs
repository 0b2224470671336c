//! Configuration file parsing
//!
//! Target files are read from the workspace root as YAML (`tend.yml`, `tend.yaml`)
//! or TOML (`tend.toml`). When none exists the built-in [`catalog`] is used.

pub mod catalog;
pub mod targets;

use std::path::{Path, PathBuf};

use crate::types::{TendError, TendResult};
use targets::{parse_targets_config, parse_targets_toml, TargetsFileConfig};

/// File names probed in the workspace root, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["tend.yml", "tend.yaml", "tend.toml"];

/// Where the active target definitions came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

/// Find the config file for a workspace, if any
pub fn discover_config_file(workspace_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Read and parse a config file, choosing the format from its extension
pub fn load_targets_file(path: &Path) -> TendResult<TargetsFileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TendError::Config(format!(
            "Failed to read target config {}: {}",
            path.display(),
            e
        ))
    })?;

    let parsed = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => parse_targets_toml(&content),
        Some("yml") | Some("yaml") => parse_targets_config(&content),
        _ => {
            return Err(TendError::Config(format!(
                "Unsupported config format for {} (expected .yml, .yaml or .toml)",
                path.display()
            )))
        }
    };

    parsed.map_err(|e| {
        TendError::Config(format!(
            "Failed to parse target config {}: {}",
            path.display(),
            e
        ))
    })
}

/// Load the explicit config, the discovered config, or the built-in catalog
pub fn load_config(
    workspace_root: &Path,
    explicit: Option<&Path>,
) -> TendResult<(TargetsFileConfig, ConfigSource)> {
    let path = match explicit {
        Some(path) if path.is_relative() => Some(workspace_root.join(path)),
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(workspace_root),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading target config");
            let config = load_targets_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        None => {
            tracing::debug!("no target config found, using built-in catalog");
            Ok((catalog::builtin_targets(), ConfigSource::BuiltIn))
        }
    }
}

/// JSON schema of the target config file
pub fn config_schema() -> TendResult<String> {
    let schema = schemars::schema_for!(TargetsFileConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| TendError::Config(format!("Failed to render schema: {}", e)))
}
