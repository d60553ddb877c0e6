//! In-memory sink that keeps every record, in order.

use super::{Level, LogSink};
use crate::events::LifecycleEvent;
use std::sync::Mutex;

/// One captured entry.
#[derive(Debug, Clone)]
pub enum Record {
    Log { level: Level, message: String },
    Lifecycle(LifecycleEvent),
}

/// Capturing sink for tests and embedding callers.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Lifecycle events only, in emission order.
    pub fn lifecycle_events(&self) -> Vec<LifecycleEvent> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Record::Lifecycle(event) => Some(event.clone()),
                Record::Log { .. } => None,
            })
            .collect()
    }

    /// Messages logged at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Record::Log { level: l, message } if *l == level => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Record>> {
        // A panicking writer cannot leave a half-pushed record behind.
        self.records.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.lock().push(Record::Log {
            level,
            message: message.to_string(),
        });
    }

    fn lifecycle(&self, event: &LifecycleEvent) {
        self.lock().push(Record::Lifecycle(event.clone()));
    }
}
