//! High-level workspace management interface
//!
//! This module provides the [`WorkspaceManager`] which serves as the primary interface
//! for all operations on a workspace. It loads the target configuration once,
//! validates it into a [`Registry`] and exposes help, plan, run and init.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tend_core::workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};
//! use tend_core::execution::{Invocation, TaskRunnerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> tend_core::types::TendResult<()> {
//! let manager = WorkspaceManager::new(WorkspaceManagerConfig {
//!     workspace_root: PathBuf::from("."),
//!     config_path: None,
//! })?;
//!
//! // Show the steps `all` would run
//! let plan = manager.plan("all")?;
//!
//! // Run the test suite
//! manager
//!     .run(&Invocation::new("test", Vec::new()), TaskRunnerConfig::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::configs::catalog::builtin_targets;
use crate::configs::targets::{render_targets_config, TargetsFileConfig};
use crate::configs::{load_config, ConfigSource, CONFIG_FILE_NAMES};
use crate::execution::{
    Invocation, InvocationSummary, ProcessExecutor, TaskRunner, TaskRunnerConfig,
};
use crate::registry::Registry;
use crate::results::{HelpListing, InitResult, TargetPlanResult};
use crate::types::{TendError, TendResult};

/// High-level workspace manager that encapsulates all workspace operations
pub struct WorkspaceManager {
    pub workspace_root: PathBuf,
    pub registry: Registry,
    pub source: ConfigSource,
    description: Option<String>,
}

/// Configuration for initializing a workspace manager
pub struct WorkspaceManagerConfig {
    pub workspace_root: PathBuf,
    /// Explicit config file; relative paths resolve against the workspace root
    pub config_path: Option<PathBuf>,
}

impl WorkspaceManager {
    /// Load and validate the targets for the given workspace root
    pub fn new(config: WorkspaceManagerConfig) -> TendResult<Self> {
        if !config.workspace_root.is_dir() {
            return Err(TendError::Config(format!(
                "Workspace root {} is not a directory",
                config.workspace_root.display()
            )));
        }

        let (targets_config, source) =
            load_config(&config.workspace_root, config.config_path.as_deref())?;

        Self::from_targets(config.workspace_root, targets_config, source)
    }

    /// Build a manager from already-parsed targets
    pub fn from_targets(
        workspace_root: PathBuf,
        targets_config: TargetsFileConfig,
        source: ConfigSource,
    ) -> TendResult<Self> {
        let registry = Registry::from_config(&targets_config)?;
        tracing::debug!(
            targets = registry.targets().len(),
            source = ?source,
            "target registry ready"
        );

        Ok(Self {
            workspace_root,
            registry,
            source,
            description: targets_config.description,
        })
    }

    /// List all registered targets in declaration order
    pub fn help(&self) -> HelpListing {
        HelpListing {
            description: self.description.clone(),
            source: self.source.clone(),
            entries: self.registry.help_entries(),
        }
    }

    /// Resolve a target into the steps it would run
    pub fn plan(&self, target: &str) -> TendResult<TargetPlanResult> {
        Ok(TargetPlanResult {
            target: target.to_string(),
            steps: self.registry.resolve(target)?,
        })
    }

    /// Run a target as child processes rooted at the workspace
    pub async fn run(
        &self,
        invocation: &Invocation,
        runner_config: TaskRunnerConfig,
    ) -> TendResult<InvocationSummary> {
        let executor = ProcessExecutor::new(&self.workspace_root);
        let runner = TaskRunner::with_config(&self.registry, executor, runner_config);
        runner.run(invocation).await
    }

    /// Write the built-in catalog as `tend.yml` into the workspace root
    pub fn init(workspace_root: &Path, force: bool) -> TendResult<InitResult> {
        if !force {
            if let Some(existing) = CONFIG_FILE_NAMES
                .iter()
                .map(|name| workspace_root.join(name))
                .find(|path| path.exists())
            {
                return Err(TendError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    existing.display()
                )));
            }
        }

        let catalog = builtin_targets();
        let rendered = render_targets_config(&catalog)?;
        let path = workspace_root.join(CONFIG_FILE_NAMES[0]);
        std::fs::write(&path, rendered)?;
        tracing::info!(path = %path.display(), "wrote starter config");

        Ok(InitResult {
            path,
            target_count: catalog.targets.len(),
        })
    }
}
