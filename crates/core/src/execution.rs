//! Task execution module
//!
//! This module handles the actual execution of targets: sequential step running,
//! process launching and the built-in removal used by cleanup targets.

pub mod clean;
pub mod command;
pub mod runner;

pub use command::{ProcessExecutor, StepExecutor};
pub use runner::{Invocation, InvocationSummary, TaskRunner, TaskRunnerConfig};
