use std::path::Path;

use anyhow::Result;
use colored::*;
use tend_core::workspace_manager::WorkspaceManager;

pub fn execute(workspace: &Path, force: bool) -> Result<()> {
    let result = WorkspaceManager::init(workspace, force)?;

    println!(
        "{} {}",
        "✓".green().bold(),
        format!(
            "Wrote {} targets to {}",
            result.target_count,
            result.path.display()
        )
        .green()
    );

    Ok(())
}
