//! Terminal styling shared by the runner and the CLI

use colored::*;

/// Palette for target labels; avoids the red/yellow/green used for status lines
const TARGET_PALETTE: [Color; 6] = [
    Color::TrueColor {
        r: 147,
        g: 112,
        b: 219,
    },
    Color::TrueColor {
        r: 64,
        g: 224,
        b: 208,
    },
    Color::TrueColor {
        r: 255,
        g: 140,
        b: 0,
    },
    Color::TrueColor {
        r: 199,
        g: 21,
        b: 133,
    },
    Color::TrueColor {
        r: 72,
        g: 209,
        b: 204,
    },
    Color::TrueColor {
        r: 138,
        g: 43,
        b: 226,
    },
];

/// Get a consistent color for a target name
pub fn target_color(target_name: &str) -> Color {
    let hash = target_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    TARGET_PALETTE[(hash % TARGET_PALETTE.len() as u64) as usize]
}

/// Header printed when an invocation enters a new target
pub fn target_header(target_name: &str) -> String {
    format!(
        "┌─ {}",
        target_name.color(target_color(target_name)).bold()
    )
}

/// Echo line printed before a step is launched
pub fn step_echo(step: &str) -> String {
    format!("│ {} {}", "$".bright_black(), step.dimmed())
}
