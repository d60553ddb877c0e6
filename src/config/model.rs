//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the agent.
///
/// This struct represents the contents of `agent.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Logging settings
    // =========================================================================
    /// File the log stream is appended to, in addition to stdout.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Emit DEBUG records (captured stdout). Also enabled by `AGENT_DEBUG=1`.
    #[serde(default)]
    pub debug: bool,

    /// Optional NDJSON file receiving one line per lifecycle event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    // =========================================================================
    // Execution settings
    // =========================================================================
    /// Hard limit for a single process-backed action.
    #[serde(default = "default_action_timeout_seconds")]
    pub action_timeout_seconds: u64,

    /// Whether stderr output on a zero exit is a warning or a failure.
    #[serde(default)]
    pub stderr_policy: StderrPolicy,

    // =========================================================================
    // Built-in actions
    // =========================================================================
    /// Settings for `list_directory`.
    #[serde(default)]
    pub list_directory: ListDirectorySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            debug: false,
            events_file: None,
            action_timeout_seconds: default_action_timeout_seconds(),
            stderr_policy: StderrPolicy::default(),
            list_directory: ListDirectorySettings::default(),
        }
    }
}
