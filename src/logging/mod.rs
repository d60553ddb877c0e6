//! Log sink capability.
//!
//! The dispatcher and every action receive an `Arc<dyn LogSink>` at
//! construction instead of reaching for a global logger. Production code uses
//! [`TracingSink`], which forwards to `tracing`; tests use [`MemorySink`] to
//! assert on exactly what was recorded and in which order.
//!
//! Severities follow a fixed convention:
//!
//! - `INFO`: lifecycle start/end and dispatch decisions
//! - `DEBUG`: captured stdout
//! - `WARN`: stderr on an otherwise successful run
//! - `ERROR`: every classified failure

mod memory;
mod subscriber;

pub use memory::{MemorySink, Record};
pub use subscriber::{TracingSink, init_subscriber};
pub use tracing::Level;

use crate::events::LifecycleEvent;

/// Destination for leveled records and lifecycle events.
///
/// Implementations must tolerate calls from several threads at once.
pub trait LogSink: Send + Sync {
    /// Record a message at the given severity.
    fn log(&self, level: Level, message: &str);

    /// Record a lifecycle event. Defaults to an INFO line with its summary.
    fn lifecycle(&self, event: &LifecycleEvent) {
        self.log(Level::INFO, &event.summary());
    }
}
