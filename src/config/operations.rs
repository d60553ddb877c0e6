//! Config loading, validation, and environment overrides.

use super::model::Config;
use super::types::DEBUG_ENV_VAR;
use crate::error::{AgentError, Result};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Returns `Ok(None)` if the file does not exist, so the caller can fall
    /// back to defaults. Unknown fields in the YAML are silently ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Config))` - Successfully loaded and validated config
    /// * `Ok(None)` - No file at `path`
    /// * `Err(AgentError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map(Some)
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| AgentError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `action_timeout_seconds` must be positive
    /// - `list_directory.program` must be non-empty
    /// - `log_file` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.action_timeout_seconds == 0 {
            return Err(AgentError::ConfigError(
                "config validation failed: action_timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if self.list_directory.program.trim().is_empty() {
            return Err(AgentError::ConfigError(
                "config validation failed: list_directory.program must be non-empty".to_string(),
            ));
        }

        if self.log_file.as_os_str().is_empty() {
            return Err(AgentError::ConfigError(
                "config validation failed: log_file must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment toggles using the given lookup.
    ///
    /// Only `AGENT_DEBUG=1` is recognized; it turns debug on but never off.
    /// `main` passes `std::env::var`; tests pass a closure.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(DEBUG_ENV_VAR).as_deref() == Some("1") {
            self.debug = true;
        }
    }

    /// The action timeout as a `Duration`.
    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_seconds)
    }
}
