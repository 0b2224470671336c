use anyhow::Result;
use colored::*;
use tend_core::execution::{Invocation, TaskRunnerConfig};
use tend_core::workspace_manager::WorkspaceManager;

pub async fn execute(manager: &WorkspaceManager, invocation: &Invocation, quiet: bool) -> Result<()> {
    let summary = manager
        .run(invocation, TaskRunnerConfig { echo: !quiet })
        .await?;

    if !quiet {
        println!(
            "{} {}",
            "✓".green().bold(),
            format!(
                "{} finished ({} step{} in {:.2?})",
                summary.target,
                summary.steps_run,
                if summary.steps_run == 1 { "" } else { "s" },
                summary.elapsed
            )
            .green()
            .bold()
        );
    }

    Ok(())
}
