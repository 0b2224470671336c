use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::TendResult;

/// One entry of a target's `steps` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StepConfig {
    /// A single command line, run through the platform shell
    Shell(String),
    /// Program followed by its arguments
    Argv(Vec<String>),
    /// Built-in removal of workspace paths matching glob patterns
    Remove(RemoveConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RemoveConfig {
    /// Glob patterns, relative to the workspace root
    pub remove: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Commands to run in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepConfig>>,
    /// Other targets to run in order, making this a composite target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetsFileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub targets: Vec<TargetConfig>,
}

pub fn parse_targets_config(yaml_str: &str) -> TendResult<TargetsFileConfig> {
    let config: TargetsFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

pub fn render_targets_config(config: &TargetsFileConfig) -> TendResult<String> {
    Ok(serde_yaml::to_string(config)?)
}

pub fn parse_targets_toml(toml_str: &str) -> TendResult<TargetsFileConfig> {
    let config: TargetsFileConfig = toml::from_str(toml_str)?;
    Ok(config)
}
