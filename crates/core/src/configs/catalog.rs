//! Built-in target catalog
//!
//! The default set of targets for a Python service: dependency install, linting,
//! formatting, tests with coverage, type checking, cache cleanup and a dev server.

use super::targets::{RemoveConfig, StepConfig, TargetConfig, TargetsFileConfig};

fn argv(parts: &[&str]) -> StepConfig {
    StepConfig::Argv(parts.iter().map(|s| s.to_string()).collect())
}

fn remove(patterns: &[&str]) -> StepConfig {
    StepConfig::Remove(RemoveConfig {
        remove: patterns.iter().map(|s| s.to_string()).collect(),
    })
}

fn target(name: &str, description: &str, steps: Vec<StepConfig>) -> TargetConfig {
    TargetConfig {
        name: name.to_string(),
        description: Some(description.to_string()),
        steps: Some(steps),
        targets: None,
    }
}

fn composite(name: &str, description: &str, members: &[&str]) -> TargetConfig {
    TargetConfig {
        name: name.to_string(),
        description: Some(description.to_string()),
        steps: None,
        targets: Some(members.iter().map(|s| s.to_string()).collect()),
    }
}

/// Targets used when the workspace has no config file
pub fn builtin_targets() -> TargetsFileConfig {
    TargetsFileConfig {
        name: None,
        description: Some("Python development tooling".to_string()),
        targets: vec![
            target(
                "install",
                "Install runtime and development dependencies and pre-commit hooks",
                vec![
                    argv(&["pip", "install", "-r", "requirements.txt"]),
                    argv(&["pip", "install", "-r", "requirements-dev.txt"]),
                    argv(&["pre-commit", "install"]),
                ],
            ),
            target(
                "lint",
                "Run linter checks and the type checker",
                vec![argv(&["ruff", "check", "."]), argv(&["mypy", "."])],
            ),
            target(
                "format",
                "Format code and sort imports",
                vec![
                    argv(&["black", "."]),
                    argv(&["isort", "."]),
                    argv(&["ruff", "format", "."]),
                ],
            ),
            target(
                "fix",
                "Auto-fix lint findings, then format and sort imports",
                vec![
                    argv(&["ruff", "check", ".", "--fix"]),
                    argv(&["black", "."]),
                    argv(&["isort", "."]),
                ],
            ),
            target("test", "Run the test suite", vec![argv(&["pytest"])]),
            target(
                "test-cov",
                "Run the test suite with terminal and HTML coverage reports",
                vec![argv(&[
                    "pytest",
                    "--cov=.",
                    "--cov-report=term-missing",
                    "--cov-report=html",
                ])],
            ),
            target("type-check", "Run the type checker", vec![argv(&["mypy", "."])]),
            target(
                "clean",
                "Delete compiled artifacts and tool caches",
                vec![
                    remove(&["**/*.pyc", "**/*.pyo", "**/__pycache__"]),
                    remove(&[
                        "**/.pytest_cache",
                        "**/.mypy_cache",
                        "**/.ruff_cache",
                        "htmlcov",
                        ".coverage",
                        "build",
                        "dist",
                        "**/*.egg-info",
                    ]),
                ],
            ),
            target(
                "dev",
                "Start the application in the foreground",
                vec![argv(&["python", "main.py"])],
            ),
            composite(
                "all",
                "Format, lint, type-check and test",
                &["format", "lint", "type-check", "test"],
            ),
        ],
    }
}
