//! The built-in `list_directory` action.

use super::process::{self, ProcessCommand};
use super::{Action, ActionError, ActionName, ActionOutput, ActionParams};
use crate::config::{Config, ListDirectorySettings, StderrPolicy};
use crate::logging::{Level, LogSink};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Parameter overriding the listed directory.
pub const PATH_PARAM: &str = "path";

/// Lists a directory with `ls -l` (program and flags configurable).
///
/// The only parameter understood is `path`, which must be a string when
/// present. On success the diagnostic is the captured listing.
pub struct ListDirectoryAction {
    settings: ListDirectorySettings,
    timeout: Duration,
    stderr_policy: StderrPolicy,
    sink: Arc<dyn LogSink>,
}

impl ListDirectoryAction {
    pub fn new(
        settings: ListDirectorySettings,
        timeout: Duration,
        stderr_policy: StderrPolicy,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            settings,
            timeout,
            stderr_policy,
            sink,
        }
    }

    pub fn from_config(config: &Config, sink: Arc<dyn LogSink>) -> Self {
        Self::new(
            config.list_directory.clone(),
            config.action_timeout(),
            config.stderr_policy,
            sink,
        )
    }

    fn directory(&self, params: Option<&ActionParams>) -> Result<PathBuf, ActionError> {
        match params.and_then(|p| p.get(PATH_PARAM)) {
            None => Ok(self.settings.path.clone()),
            Some(Value::String(path)) => Ok(PathBuf::from(path)),
            Some(other) => Err(ActionError::UnexpectedFailure(format!(
                "parameter '{}' must be a string, got {}",
                PATH_PARAM, other
            ))),
        }
    }
}

impl Action for ListDirectoryAction {
    fn name(&self) -> ActionName {
        ActionName::ListDirectory
    }

    fn execute(&self, params: Option<&ActionParams>) -> Result<ActionOutput, ActionError> {
        self.sink.log(
            Level::INFO,
            &format!("Executing action: {}", ActionName::ListDirectory),
        );

        let directory = self.directory(params)?;
        let command = ProcessCommand::new(&self.settings.program, self.timeout)
            .args(&self.settings.args)
            .arg(directory.to_string_lossy());

        let output = process::run_and_report(&command, self.sink.as_ref(), self.stderr_policy)?;
        Ok(ActionOutput::with_diagnostic(output.stdout))
    }
}
