//! Step execution
//!
//! [`StepExecutor`] is the seam between the runner and the outside world. The
//! production [`ProcessExecutor`] launches child processes in the workspace root
//! and performs built-in removals; tests substitute a recording double.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;

use crate::execution::clean::remove_matching;
use crate::execution::runner::Invocation;
use crate::registry::{PlannedStep, Step};
use crate::types::{TendError, TendResult};

/// Executes one resolved step, returning an error for any non-zero outcome
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute(&self, planned: &PlannedStep, invocation: &Invocation) -> TendResult<()>;
}

/// Runs steps as real child processes rooted at the workspace
pub struct ProcessExecutor {
    workspace_root: PathBuf,
}

impl ProcessExecutor {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    async fn run_command(
        &self,
        mut command: Command,
        program: &str,
        planned: &PlannedStep,
        invocation: &Invocation,
    ) -> TendResult<()> {
        command
            .current_dir(&self.workspace_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env("TEND_TARGET", &invocation.target);

        for (i, arg) in invocation.args.iter().enumerate() {
            command.env(format!("TEND_ARG_{}", i), arg);
        }

        let status = command.status().await.map_err(|source| {
            tracing::error!(program, error = %source, "failed to launch step");
            TendError::LaunchFailure {
                target: planned.target.clone(),
                program: program.to_string(),
                source,
            }
        })?;

        if status.success() {
            return Ok(());
        }

        Err(TendError::StepFailure {
            target: planned.target.clone(),
            step: planned.step.to_string(),
            code: exit_code(status),
        })
    }
}

#[async_trait]
impl StepExecutor for ProcessExecutor {
    async fn execute(&self, planned: &PlannedStep, invocation: &Invocation) -> TendResult<()> {
        match &planned.step {
            Step::Exec { program, args } => {
                let mut command = Command::new(program);
                command.args(args);
                self.run_command(command, program, planned, invocation).await
            }
            Step::Shell(line) => {
                let (shell, flag) = platform_shell();
                let mut command = Command::new(shell);
                command.arg(flag).arg(line);
                self.run_command(command, shell, planned, invocation).await
            }
            Step::Remove { patterns } => {
                let root = self.workspace_root.clone();
                let patterns = patterns.clone();
                let removed = tokio::task::spawn_blocking(move || remove_matching(&root, &patterns))
                    .await
                    .map_err(|e| TendError::Io(std::io::Error::other(e)))??;
                tracing::info!(target_name = %planned.target, removed = removed.len(), "removal finished");
                Ok(())
            }
        }
    }
}

fn platform_shell() -> (&'static str, &'static str) {
    if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Map a finished process status to the code the invocation should exit with
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
