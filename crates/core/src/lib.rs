//! Tend Core Library
//!
//! This is the core library for the tend developer-tooling task runner. It
//! provides all the business logic: loading target definitions, validating them
//! into a registry, resolving composite targets and executing steps in order.
//!
//! ## Architecture
//!
//! - [`workspace_manager`] - High-level interface used by the CLI
//! - [`registry`] - Validated targets, resolution and help entries
//! - [`execution`] - Sequential runner, process executor and built-in removal
//! - [`configs`] - Config file discovery, parsing and the built-in catalog
//! - [`results`] - Result types for workspace operations
//! - [`style`] - Terminal styling shared with the CLI
//! - [`types`] - Error type, exit code mapping and result alias
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tend_core::workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> tend_core::types::TendResult<()> {
//! let manager = WorkspaceManager::new(WorkspaceManagerConfig {
//!     workspace_root: PathBuf::from("."),
//!     config_path: None,
//! })?;
//!
//! for entry in manager.help().entries {
//!     println!("{}  {}", entry.name, entry.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod registry;
pub mod results;
pub mod style;
pub mod types;
pub mod workspace_manager;

// Re-export the main types for easier usage
pub use types::{TendError, TendResult};
pub use workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};
