//! Command implementations for actuator.
//!
//! This module wires the configured registry and dispatcher together and
//! routes CLI commands to their handlers.

mod run;

pub use run::parse_params;

use crate::cli::Command;
use crate::config::Config;
use crate::dispatch::{Dispatcher, Registry};
use crate::error::Result;
use crate::exit_codes;
use crate::logging::LogSink;
use std::sync::Arc;

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on completion; `Err` only for plumbing
/// failures such as malformed parameters.
pub fn dispatch(command: Command, config: &Config, sink: Arc<dyn LogSink>) -> Result<i32> {
    let registry = Registry::builtin(config, Arc::clone(&sink));
    let dispatcher = Dispatcher::new(registry, Arc::clone(&sink));

    match command {
        Command::Run(args) => run::cmd_run(&dispatcher, sink.as_ref(), args),
        Command::List => cmd_list(&dispatcher),
    }
}

fn cmd_list(dispatcher: &Dispatcher) -> Result<i32> {
    let actions = dispatcher.actions();

    if actions.is_empty() {
        println!("No actions registered.");
        return Ok(exit_codes::SUCCESS);
    }

    println!("Registered actions ({}):", actions.len());
    for name in actions {
        println!("  {:<20} {}", name.as_str(), name.description());
    }

    Ok(exit_codes::SUCCESS)
}
