use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::*;
use tend_core::execution::Invocation;
use tend_core::registry::HELP_TARGET;
use tend_core::types::TendError;
use tend_core::workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};
use tracing_subscriber::EnvFilter;

mod commands;

/// Tend - A developer-tooling task runner
#[derive(Parser)]
#[command(name = "tend")]
#[command(about = "Run named developer-tooling targets (lint, format, test, ...) in order")]
#[command(version)]
struct Cli {
    /// Path to the workspace root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Target config file (defaults to tend.yml, tend.yaml or tend.toml in the workspace)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print only the tools' own output (no target headers, step echo or success line)
    #[arg(short, long)]
    quiet: bool,

    /// Print the steps the target would run without running them
    #[arg(long, conflicts_with_all = ["schema", "init"])]
    plan: bool,

    /// Print the JSON schema of the target config file
    #[arg(long, conflicts_with = "init")]
    schema: bool,

    /// Write the built-in targets to tend.yml in the workspace
    #[arg(long)]
    init: bool,

    /// Overwrite an existing config file with --init
    #[arg(long, requires = "init")]
    force: bool,

    /// Target to run (`help` lists all targets), then free-form arguments passed
    /// to steps as TEND_ARG_<n>. Everything after the target is passed through.
    #[arg(
        value_name = "TARGET [ARGS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

impl Cli {
    /// Split the positional words into the target and its free-form arguments
    fn target_and_args(&mut self) -> (String, Vec<String>) {
        let mut words = std::mem::take(&mut self.command).into_iter();
        let target = words.next().unwrap_or_else(|| HELP_TARGET.to_string());
        (target, words.collect())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

async fn execute(mut cli: Cli) -> Result<()> {
    if cli.schema {
        return commands::schema::execute();
    }
    if cli.init {
        return commands::init::execute(&cli.workspace, cli.force);
    }

    let (target, args) = cli.target_and_args();

    // Initialize workspace manager with all business logic
    let manager = WorkspaceManager::new(WorkspaceManagerConfig {
        workspace_root: cli.workspace,
        config_path: cli.config,
    })?;

    // Execute command (CLI layer only handles presentation)
    if target == HELP_TARGET {
        return commands::help::execute(&manager);
    }
    if cli.plan {
        return commands::plan::execute(&manager, &target);
    }
    commands::run::execute(&manager, &Invocation::new(target, args), cli.quiet).await
}

/// Map a failure to the process exit code, printing a line only when no tool already did
fn report(err: anyhow::Error) -> ExitCode {
    let code = match err.downcast_ref::<TendError>() {
        Some(tend_err) => {
            if !tend_err.is_reported_by_tool() {
                eprintln!("{} {}", "error:".red().bold(), tend_err);
            }
            tend_err.exit_code()
        }
        None => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            1
        }
    };

    ExitCode::from(u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1))
}
