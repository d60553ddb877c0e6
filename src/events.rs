//! Lifecycle events bracketing every dispatch.
//!
//! Each dispatch emits exactly one `Start` event followed by exactly one `End`
//! event, both naming the requested action. Events go to the log sink; when an
//! events file is configured the sink also appends them as NDJSON (one JSON
//! object per line).
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `phase`: `start` or `end`
//! - `action`: the requested action name, verbatim
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `outcome`: `succeeded` / `failed`, only on `end`
//! - `details`: freeform object (failure kind, duration)

use crate::action::Outcome;
use crate::error::{AgentError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Which side of a dispatch an event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    End,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Start => write!(f, "start"),
            Phase::End => write!(f, "end"),
        }
    }
}

/// A start or end record for one dispatch attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    pub phase: Phase,

    /// The requested action name, which may not be a registered one.
    pub action: String,

    /// The actor running the agent (e.g., `user@HOST`).
    pub actor: String,

    /// Final outcome; present only on `End`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,

    /// Freeform details object.
    pub details: Value,
}

impl LifecycleEvent {
    fn new(phase: Phase, action: &str, outcome: Option<Outcome>) -> Self {
        Self {
            ts: Utc::now(),
            phase,
            action: action.to_string(),
            actor: get_actor_string(),
            outcome,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Event marking the start of a dispatch.
    pub fn start(action: &str) -> Self {
        Self::new(Phase::Start, action, None)
    }

    /// Event marking the end of a dispatch with its outcome.
    pub fn end(action: &str, outcome: Outcome) -> Self {
        Self::new(Phase::End, action, Some(outcome))
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Human-readable line written to the log stream.
    pub fn summary(&self) -> String {
        match (self.phase, self.outcome) {
            (Phase::Start, _) => format!("--- Action '{}' START ---", self.action),
            (Phase::End, Some(outcome)) => format!(
                "--- Action '{}' END (Status: {}) ---",
                self.action,
                outcome.label()
            ),
            (Phase::End, None) => format!("--- Action '{}' END ---", self.action),
        }
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            AgentError::LoggingError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to an NDJSON file, creating it and its parent directory
/// if needed. Each call writes exactly one line.
pub fn append_event(path: &Path, event: &LifecycleEvent) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AgentError::LoggingError(format!(
                "failed to create events directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AgentError::LoggingError(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        AgentError::LoggingError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn start_event_has_no_outcome() {
        let event = LifecycleEvent::start("list_directory");
        assert_eq!(event.phase, Phase::Start);
        assert_eq!(event.action, "list_directory");
        assert!(event.outcome.is_none());
        assert_eq!(event.summary(), "--- Action 'list_directory' START ---");
    }

    #[test]
    fn end_event_summary_includes_status() {
        let event = LifecycleEvent::end("list_directory", Outcome::Succeeded);
        assert_eq!(
            event.summary(),
            "--- Action 'list_directory' END (Status: SUCCESS) ---"
        );

        let event = LifecycleEvent::end("delete_universe", Outcome::Failed);
        assert_eq!(
            event.summary(),
            "--- Action 'delete_universe' END (Status: FAILURE) ---"
        );
    }

    #[test]
    fn ndjson_line_is_single_line() {
        let event = LifecycleEvent::end("list_directory", Outcome::Failed)
            .with_details(json!({"failure": "timed_out", "note": "line1\nline2"}));
        let line = event.to_ndjson_line().unwrap();

        assert!(!line.contains('\n'));
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["phase"], "end");
        assert_eq!(parsed["outcome"], "failed");
        assert_eq!(parsed["details"]["failure"], "timed_out");
    }

    #[test]
    fn start_line_omits_outcome_field() {
        let line = LifecycleEvent::start("x").to_ndjson_line().unwrap();
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert!(parsed.get("outcome").is_none());
        assert!(parsed["actor"].as_str().unwrap().contains('@'));
    }

    #[test]
    fn append_event_writes_one_line_per_event() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("events.ndjson");

        append_event(&path, &LifecycleEvent::start("list_directory")).unwrap();
        append_event(
            &path,
            &LifecycleEvent::end("list_directory", Outcome::Succeeded),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LifecycleEvent = serde_json::from_str(lines[0]).unwrap();
        let second: LifecycleEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first.phase, Phase::Start);
        assert_eq!(second.phase, Phase::End);
        assert_eq!(second.outcome, Some(Outcome::Succeeded));
    }
}
