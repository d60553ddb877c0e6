//! Actuator: run a named action and record its start/end/outcome trail.
//!
//! This is the main entry point for the `actuator` CLI. It loads config,
//! installs logging, dispatches the requested command, and maps the result
//! to a process exit code.

use actuator::cli::Cli;
use actuator::commands;
use actuator::config::Config;
use actuator::error::Result;
use actuator::logging::{self, LogSink, TracingSink};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Logging may not be up yet, so report on stderr directly.
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let loaded = Config::load(&cli.config)?;
    let config_found = loaded.is_some();

    let mut config = loaded.unwrap_or_default();
    config.apply_env(|key| std::env::var(key).ok());
    if cli.debug {
        config.debug = true;
    }

    logging::init_subscriber(&config)?;
    tracing::info!(
        "Logger initialized in {} mode.",
        if config.debug { "DEBUG" } else { "INFO" }
    );
    if !config_found {
        tracing::warn!(
            "Could not open config file '{}'. Using default values.",
            cli.config.display()
        );
    }

    let sink: Arc<dyn LogSink> = Arc::new(TracingSink::from_config(&config));
    commands::dispatch(cli.command, &config, sink)
}
