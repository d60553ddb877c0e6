//! Core data types shared by actions and the dispatcher.

use super::error::{ActionError, FailureKind};
use crate::exit_codes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque parameter bag handed to an action unmodified.
pub type ActionParams = BTreeMap<String, Value>;

/// The closed set of actions this agent knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    /// `ls -l` of a directory.
    ListDirectory,
}

impl ActionName {
    /// Every known action, in display order.
    pub const ALL: &'static [ActionName] = &[ActionName::ListDirectory];

    /// Parse an action name from its wire form.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "list_directory" => Some(Self::ListDirectory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::ListDirectory => "list_directory",
        }
    }

    /// One-line description for `actuator list`.
    pub fn description(&self) -> &'static str {
        match self {
            ActionName::ListDirectory => "List directory contents with `ls -l`",
        }
    }
}

impl std::fmt::Display for ActionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful action hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutput {
    /// Human-readable detail, typically captured stdout.
    pub diagnostic: Option<String>,
}

impl ActionOutput {
    pub fn with_diagnostic(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Two-valued dispatch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    /// Status label used in lifecycle log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "SUCCESS",
            Outcome::Failed => "FAILURE",
        }
    }
}

/// Normalized result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub outcome: Outcome,
    /// Captured output on success, rendered error on failure.
    pub diagnostic: Option<String>,
    /// Set exactly when `outcome` is `Failed`.
    pub failure: Option<FailureKind>,
}

impl ActionResult {
    pub fn succeeded(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    /// Process exit code for this result (0 on success).
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Outcome::Succeeded => exit_codes::SUCCESS,
            Outcome::Failed => exit_codes::ACTION_FAILED,
        }
    }
}

impl From<ActionOutput> for ActionResult {
    fn from(output: ActionOutput) -> Self {
        Self {
            outcome: Outcome::Succeeded,
            diagnostic: output.diagnostic,
            failure: None,
        }
    }
}

impl From<&ActionError> for ActionResult {
    fn from(err: &ActionError) -> Self {
        Self {
            outcome: Outcome::Failed,
            diagnostic: Some(err.to_string()),
            failure: Some(err.kind()),
        }
    }
}

impl From<Result<ActionOutput, ActionError>> for ActionResult {
    fn from(result: Result<ActionOutput, ActionError>) -> Self {
        match result {
            Ok(output) => output.into(),
            Err(err) => (&err).into(),
        }
    }
}
