use std::path::PathBuf;

use thiserror::Error;

/// Exit code reported when a target name is not registered or the configuration is invalid
pub const USAGE_EXIT_CODE: i32 = 2;

/// The main error type for tend operations
#[derive(Debug, Error)]
pub enum TendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown target '{}'{}", .name, suggestion_suffix(.suggestion))]
    UnknownTarget {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Step '{step}' of target '{target}' failed with exit code {code}")]
    StepFailure {
        target: String,
        step: String,
        code: i32,
    },

    #[error("Failed to launch '{program}' for target '{target}': {source}")]
    LaunchFailure {
        target: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {}: {}", .path.display(), .source)]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TendError {
    /// Process exit code this error should surface as
    pub fn exit_code(&self) -> i32 {
        match self {
            TendError::StepFailure { code, .. } => *code,
            TendError::LaunchFailure { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => 127,
                std::io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            TendError::UnknownTarget { .. }
            | TendError::Config(_)
            | TendError::Yaml(_)
            | TendError::Toml(_) => USAGE_EXIT_CODE,
            TendError::Io(_) | TendError::Remove { .. } => 1,
        }
    }

    /// Whether the failing tool already printed its own diagnostic
    pub fn is_reported_by_tool(&self) -> bool {
        matches!(self, TendError::StepFailure { .. })
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

/// Result type alias for tend operations
pub type TendResult<T> = Result<T, TendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_passes_code_through() {
        let err = TendError::StepFailure {
            target: "lint".to_string(),
            step: "ruff check .".to_string(),
            code: 3,
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.is_reported_by_tool());
    }

    #[test]
    fn launch_failure_codes_follow_shell_conventions() {
        let not_found = TendError::LaunchFailure {
            target: "lint".to_string(),
            program: "ruff".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let denied = TendError::LaunchFailure {
            target: "lint".to_string(),
            program: "ruff".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(not_found.exit_code(), 127);
        assert_eq!(denied.exit_code(), 126);
        assert!(!not_found.is_reported_by_tool());
    }

    #[test]
    fn unknown_target_mentions_suggestion() {
        let err = TendError::UnknownTarget {
            name: "lnt".to_string(),
            suggestion: Some("lint".to_string()),
        };
        assert_eq!(err.exit_code(), USAGE_EXIT_CODE);
        assert_eq!(
            err.to_string(),
            "Unknown target 'lnt' (did you mean 'lint'?)"
        );
    }
}
