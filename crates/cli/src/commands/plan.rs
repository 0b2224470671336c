use anyhow::Result;
use colored::*;
use tend_core::style::target_color;
use tend_core::workspace_manager::WorkspaceManager;

pub fn execute(manager: &WorkspaceManager, target: &str) -> Result<()> {
    // Resolution errors (unknown target) surface as TendError for exit code mapping
    let plan = manager.plan(target)?;

    println!("{} {}", "Execution plan for".bold(), target.cyan());
    println!("\n{}:", "Execution order".bold());
    for (i, planned) in plan.steps.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            format!("[{}]", planned.target).color(target_color(&planned.target)),
            planned.step
        );
    }

    Ok(())
}
