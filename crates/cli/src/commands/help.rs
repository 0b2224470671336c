use anyhow::Result;
use colored::*;
use tend_core::configs::ConfigSource;
use tend_core::style::target_color;
use tend_core::workspace_manager::WorkspaceManager;

pub fn execute(manager: &WorkspaceManager) -> Result<()> {
    let listing = manager.help();

    println!("{} tend [OPTIONS] <TARGET> [ARGS]...", "Usage:".bold());
    match &listing.source {
        ConfigSource::File(path) => {
            println!("{} {}", "Config:".bold(), path.display().to_string().dimmed())
        }
        ConfigSource::BuiltIn => println!("{} {}", "Config:".bold(), "built-in".dimmed()),
    }
    if let Some(description) = &listing.description {
        println!("{}", description.dimmed());
    }
    println!();
    println!("{}", "Targets".bold().underline());

    if listing.entries.is_empty() {
        println!("  {}", "No targets defined".dimmed());
        return Ok(());
    }

    let width = listing
        .entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    for entry in &listing.entries {
        let name = format!("{:<width$}", entry.name, width = width);
        let marker = if entry.composite {
            " (composite)".bright_black().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}  {}{}",
            name.color(target_color(&entry.name)).bold(),
            entry.description,
            marker
        );
    }

    Ok(())
}
