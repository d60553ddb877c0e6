//! CLI argument parsing for actuator.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Actuator: run a named action and log its start/end lifecycle.
#[derive(Parser, Debug)]
#[command(name = "actuator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the YAML config file. Defaults apply if it does not exist.
    #[arg(long, global = true, default_value = "agent.yaml", value_name = "PATH")]
    pub config: PathBuf,

    /// Log captured stdout at DEBUG (same as AGENT_DEBUG=1).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for actuator.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch a single action.
    ///
    /// Exits 0 if the action succeeded and 1 if it failed for any reason,
    /// including an unknown action name.
    Run(RunArgs),

    /// List the registered actions.
    List,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Name of the action to run.
    #[arg(default_value = "list_directory")]
    pub action: String,

    /// Action parameter as KEY=VALUE (repeatable). VALUE is parsed as JSON
    /// when possible, otherwise taken as a string.
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Action parameters as a JSON object. `--param` entries override keys.
    #[arg(long, value_name = "JSON")]
    pub params_json: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
