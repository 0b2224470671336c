//! Result types for workspace operations
//!
//! This module contains the result types returned by [`WorkspaceManager`](crate::WorkspaceManager)
//! operations, keeping presentation data out of the CLI.

use std::path::PathBuf;

use crate::configs::ConfigSource;
use crate::registry::{HelpEntry, PlannedStep};

/// Result of listing the registered targets
#[derive(Debug)]
pub struct HelpListing {
    pub description: Option<String>,
    pub source: ConfigSource,
    pub entries: Vec<HelpEntry>,
}

/// Result of resolving a target without running it
#[derive(Debug)]
pub struct TargetPlanResult {
    pub target: String,
    pub steps: Vec<PlannedStep>,
}

/// Result of writing the starter config file
#[derive(Debug)]
pub struct InitResult {
    pub path: PathBuf,
    pub target_count: usize,
}
