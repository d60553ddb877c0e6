//! Configuration types and defaults for the agent.
//!
//! This module defines enums, nested settings, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default timeout for a process-backed action, in seconds.
pub const DEFAULT_ACTION_TIMEOUT_SECONDS: u64 = 10;

/// Environment variable that switches the agent into debug logging.
pub const DEBUG_ENV_VAR: &str = "AGENT_DEBUG";

/// What to do when a process exits 0 but wrote to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StderrPolicy {
    /// Log stderr at WARN and keep the successful outcome (default).
    #[default]
    Warn,
    /// Treat any stderr output as a failed run.
    Fail,
}

/// Settings for the built-in `list_directory` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDirectorySettings {
    /// Executable to run; resolved against PATH.
    pub program: String,

    /// Flags passed before the directory argument.
    pub args: Vec<String>,

    /// Directory listed when the caller does not supply a `path` parameter.
    pub path: PathBuf,
}

impl Default for ListDirectorySettings {
    fn default() -> Self {
        Self {
            program: "ls".to_string(),
            args: vec!["-l".to_string()],
            path: PathBuf::from("."),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_log_file() -> PathBuf {
    PathBuf::from("agent.log")
}
pub(crate) fn default_action_timeout_seconds() -> u64 {
    DEFAULT_ACTION_TIMEOUT_SECONDS
}
