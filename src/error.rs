//! Error types for the actuator plumbing.
//!
//! These cover everything around the dispatch core: config loading, CLI
//! parameter parsing, and logging setup. Failures of an action itself are
//! never raised as `AgentError`; they are reported through
//! [`crate::action::ActionError`] inside an `ActionResult`.

use crate::exit_codes;
use thiserror::Error;

/// Error type for the agent's outer layers.
#[derive(Error, Debug)]
pub enum AgentError {
    /// User provided malformed arguments.
    #[error("{0}")]
    UserError(String),

    /// Config file could not be read, parsed, or validated.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// The log sink or event trail could not be set up or written.
    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl AgentError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AgentError::UserError(_) => exit_codes::USER_ERROR,
            AgentError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            AgentError::LoggingError(_) => exit_codes::CONFIG_ERROR,
        }
    }
}

/// Result type alias for agent plumbing.
pub type Result<T> = std::result::Result<T, AgentError>;
