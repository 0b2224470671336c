//! High-level task runner
//!
//! Resolves a target into its ordered steps up front, then executes them one at a
//! time. The first failing step ends the invocation; nothing after it runs,
//! including the remaining members of any composite target.

use std::time::{Duration, Instant};

use crate::execution::command::StepExecutor;
use crate::registry::Registry;
use crate::style::{step_echo, target_header};
use crate::types::TendResult;

/// One request to run a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub target: String,
    /// Free-form arguments following the target name, exported to steps as `TEND_ARG_<i>`
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(target: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            target: target.into(),
            args,
        }
    }
}

/// Configuration for the task runner
#[derive(Debug, Clone)]
pub struct TaskRunnerConfig {
    /// Print a header per target and each step before launching it
    pub echo: bool,
}

impl Default for TaskRunnerConfig {
    fn default() -> Self {
        Self { echo: true }
    }
}

/// Outcome of an invocation where every step succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSummary {
    pub target: String,
    pub steps_run: usize,
    pub elapsed: Duration,
}

/// Sequential runner over a registry and a step executor
pub struct TaskRunner<'a, E: StepExecutor> {
    registry: &'a Registry,
    executor: E,
    config: TaskRunnerConfig,
}

impl<'a, E: StepExecutor> TaskRunner<'a, E> {
    pub fn new(registry: &'a Registry, executor: E) -> Self {
        Self::with_config(registry, executor, TaskRunnerConfig::default())
    }

    pub fn with_config(registry: &'a Registry, executor: E, config: TaskRunnerConfig) -> Self {
        Self {
            registry,
            executor,
            config,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run every step of the invoked target, halting at the first failure
    pub async fn run(&self, invocation: &Invocation) -> TendResult<InvocationSummary> {
        let planned = self.registry.resolve(&invocation.target)?;
        tracing::debug!(
            target_name = %invocation.target,
            steps = planned.len(),
            "resolved invocation"
        );

        let started = Instant::now();
        let mut current_target: Option<&str> = None;

        for (position, planned_step) in planned.iter().enumerate() {
            if self.config.echo {
                if current_target != Some(planned_step.target.as_str()) {
                    println!("{}", target_header(&planned_step.target));
                }
                println!("{}", step_echo(&planned_step.step.to_string()));
            }
            current_target = Some(planned_step.target.as_str());

            tracing::info!(
                target_name = %planned_step.target,
                step = %planned_step.step,
                position = position + 1,
                total = planned.len(),
                "running step"
            );

            if let Err(err) = self.executor.execute(planned_step, invocation).await {
                tracing::debug!(
                    target_name = %planned_step.target,
                    step = %planned_step.step,
                    exit_code = err.exit_code(),
                    "step failed, halting invocation"
                );
                return Err(err);
            }
        }

        Ok(InvocationSummary {
            target: invocation.target.clone(),
            steps_run: planned.len(),
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::configs::catalog::builtin_targets;
    use crate::configs::targets::parse_targets_config;
    use crate::registry::PlannedStep;
    use crate::types::TendError;

    /// Records executed steps and fails those given a non-zero code
    #[derive(Default)]
    struct RecordingExecutor {
        exit_codes: HashMap<String, i32>,
        executed: Mutex<Vec<String>>,
    }

    impl RecordingExecutor {
        fn failing(codes: &[(&str, i32)]) -> Self {
            Self {
                exit_codes: codes.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
                executed: Mutex::new(Vec::new()),
            }
        }

        fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StepExecutor for RecordingExecutor {
        async fn execute(&self, planned: &PlannedStep, _invocation: &Invocation) -> TendResult<()> {
            let line = planned.step.to_string();
            self.executed.lock().unwrap().push(line.clone());
            match self.exit_codes.get(&line) {
                Some(&code) if code != 0 => Err(TendError::StepFailure {
                    target: planned.target.clone(),
                    step: line,
                    code,
                }),
                _ => Ok(()),
            }
        }
    }

    const EXAMPLE: &str = r#"
targets:
  - name: format
    steps: ["fmt1", "fmt2", "fmt3"]
  - name: lint
    steps: ["lint1", "lint2"]
  - name: all
    targets: [format, lint]
"#;

    fn example_registry() -> Registry {
        Registry::from_config(&parse_targets_config(EXAMPLE).unwrap()).unwrap()
    }

    fn quiet() -> TaskRunnerConfig {
        TaskRunnerConfig { echo: false }
    }

    #[tokio::test]
    async fn composite_halts_at_first_failing_step() {
        let registry = example_registry();
        let runner = TaskRunner::with_config(
            &registry,
            RecordingExecutor::failing(&[("lint1", 1)]),
            quiet(),
        );

        let err = runner
            .run(&Invocation::new("all", Vec::new()))
            .await
            .unwrap_err();

        assert_eq!(
            runner.executor().executed(),
            vec!["fmt1", "fmt2", "fmt3", "lint1"]
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn failure_code_is_propagated_verbatim() {
        let registry = example_registry();
        let runner = TaskRunner::with_config(
            &registry,
            RecordingExecutor::failing(&[("fmt2", 42)]),
            quiet(),
        );

        let err = runner
            .run(&Invocation::new("format", Vec::new()))
            .await
            .unwrap_err();

        assert_eq!(runner.executor().executed(), vec!["fmt1", "fmt2"]);
        assert_eq!(err.exit_code(), 42);
    }

    #[tokio::test]
    async fn successful_invocation_runs_every_step() {
        let registry = example_registry();
        let runner = TaskRunner::with_config(&registry, RecordingExecutor::default(), quiet());

        let summary = runner
            .run(&Invocation::new("all", Vec::new()))
            .await
            .unwrap();

        assert_eq!(summary.steps_run, 5);
        assert_eq!(summary.target, "all");
        assert_eq!(
            runner.executor().executed(),
            vec!["fmt1", "fmt2", "fmt3", "lint1", "lint2"]
        );
    }

    #[tokio::test]
    async fn unknown_target_runs_nothing() {
        let registry = example_registry();
        let runner = TaskRunner::with_config(&registry, RecordingExecutor::default(), quiet());

        let err = runner
            .run(&Invocation::new("deploy", Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, TendError::UnknownTarget { .. }));
        assert!(runner.executor().executed().is_empty());
    }

    #[tokio::test]
    async fn builtin_all_stops_after_failing_lint() {
        let registry = Registry::from_config(&builtin_targets()).unwrap();
        let runner = TaskRunner::with_config(
            &registry,
            RecordingExecutor::failing(&[("ruff check .", 1)]),
            quiet(),
        );

        let err = runner
            .run(&Invocation::new("all", Vec::new()))
            .await
            .unwrap_err();

        assert_eq!(
            runner.executor().executed(),
            vec!["black .", "isort .", "ruff format .", "ruff check ."]
        );
        assert!(matches!(err, TendError::StepFailure { ref target, .. } if target == "lint"));
    }

    #[tokio::test]
    async fn every_builtin_target_runs_exactly_its_steps() {
        let registry = Registry::from_config(&builtin_targets()).unwrap();
        let expected: &[(&str, &[&str])] = &[
            (
                "install",
                &[
                    "pip install -r requirements.txt",
                    "pip install -r requirements-dev.txt",
                    "pre-commit install",
                ],
            ),
            ("lint", &["ruff check .", "mypy ."]),
            ("format", &["black .", "isort .", "ruff format ."]),
            ("fix", &["ruff check . --fix", "black .", "isort ."]),
            ("test", &["pytest"]),
            (
                "test-cov",
                &["pytest --cov=. --cov-report=term-missing --cov-report=html"],
            ),
            ("type-check", &["mypy ."]),
            (
                "clean",
                &[
                    "remove **/*.pyc **/*.pyo **/__pycache__",
                    "remove **/.pytest_cache **/.mypy_cache **/.ruff_cache htmlcov .coverage build dist **/*.egg-info",
                ],
            ),
            ("dev", &["python main.py"]),
            (
                "all",
                &[
                    "black .",
                    "isort .",
                    "ruff format .",
                    "ruff check .",
                    "mypy .",
                    "mypy .",
                    "pytest",
                ],
            ),
        ];
        assert_eq!(expected.len(), registry.targets().len());

        for (name, steps) in expected {
            let runner = TaskRunner::with_config(&registry, RecordingExecutor::default(), quiet());
            runner
                .run(&Invocation::new(*name, Vec::new()))
                .await
                .unwrap();

            assert_eq!(runner.executor().executed(), steps.to_vec(), "target {}", name);
        }
    }
}
