//! Failure taxonomy for action execution.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why an action did not succeed.
///
/// Every variant is terminal for the dispatch that produced it. The caller of
/// `dispatch` only sees the boolean outcome plus [`FailureKind`] and the
/// rendered message; nothing here is propagated past the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The requested name is not bound in the registry.
    #[error("unknown action requested: '{0}'")]
    UnknownAction(String),

    /// The executable could not be found on the search path.
    #[error("command '{program}' not found; ensure it is installed and in PATH")]
    ExecutableNotFound { program: String },

    /// The process ran to completion with a non-zero status.
    #[error("'{command}' failed with exit code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The process was still running at the deadline and was killed.
    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    /// Anything else: spawn errors, signals, bad parameters, panics.
    #[error("unexpected failure: {0}")]
    UnexpectedFailure(String),
}

impl ActionError {
    /// The classification of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ActionError::UnknownAction(_) => FailureKind::UnknownAction,
            ActionError::ExecutableNotFound { .. } => FailureKind::ExecutableNotFound,
            ActionError::NonZeroExit { .. } => FailureKind::NonZeroExit,
            ActionError::TimedOut { .. } => FailureKind::TimedOut,
            ActionError::UnexpectedFailure(_) => FailureKind::UnexpectedFailure,
        }
    }
}

/// Fieldless discriminant of [`ActionError`], carried on a failed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownAction,
    ExecutableNotFound,
    NonZeroExit,
    TimedOut,
    UnexpectedFailure,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownAction => "unknown_action",
            FailureKind::ExecutableNotFound => "executable_not_found",
            FailureKind::NonZeroExit => "non_zero_exit",
            FailureKind::TimedOut => "timed_out",
            FailureKind::UnexpectedFailure => "unexpected_failure",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let cases = [
            (ActionError::UnknownAction("x".into()), FailureKind::UnknownAction),
            (
                ActionError::ExecutableNotFound { program: "ls".into() },
                FailureKind::ExecutableNotFound,
            ),
            (
                ActionError::NonZeroExit {
                    command: "ls".into(),
                    code: 2,
                    stderr: String::new(),
                },
                FailureKind::NonZeroExit,
            ),
            (
                ActionError::TimedOut {
                    command: "sleep 5".into(),
                    timeout: Duration::from_secs(1),
                },
                FailureKind::TimedOut,
            ),
            (
                ActionError::UnexpectedFailure("boom".into()),
                FailureKind::UnexpectedFailure,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn non_zero_exit_message_carries_code_and_stderr() {
        let err = ActionError::NonZeroExit {
            command: "ls -l missing".into(),
            code: 2,
            stderr: "ls: cannot access 'missing': No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 2"));
        assert!(msg.contains("cannot access"));
    }

    #[test]
    fn timed_out_message_names_the_limit() {
        let err = ActionError::TimedOut {
            command: "sleep 30".into(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "'sleep 30' timed out after 10s");
    }

    #[test]
    fn failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::ExecutableNotFound).unwrap();
        assert_eq!(json, "\"executable_not_found\"");
        assert_eq!(FailureKind::TimedOut.to_string(), "timed_out");
    }
}
