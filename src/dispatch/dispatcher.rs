//! Dispatch: resolve, bracket with lifecycle events, normalize the result.

use super::registry::Registry;
use crate::action::{Action, ActionError, ActionName, ActionOutput, ActionParams, ActionResult};
use crate::events::LifecycleEvent;
use crate::logging::{Level, LogSink};
use serde_json::json;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Owns the registry and runs actions by name.
pub struct Dispatcher {
    registry: Registry,
    sink: Arc<dyn LogSink>,
}

impl Dispatcher {
    pub fn new(registry: Registry, sink: Arc<dyn LogSink>) -> Self {
        Self { registry, sink }
    }

    /// Run the action bound to `name`.
    ///
    /// Always emits exactly one Start event, then exactly one End event, both
    /// carrying `name` verbatim, even when the name is unknown. Every failure
    /// comes back as a failed `ActionResult` and is logged at ERROR.
    pub fn dispatch(&self, name: &str, params: Option<&ActionParams>) -> ActionResult {
        self.sink.log(
            Level::INFO,
            &format!("Received request to run action: '{}'", name),
        );
        self.sink.lifecycle(&LifecycleEvent::start(name));

        let started = Instant::now();
        let result = match self.registry.resolve(name) {
            Some(action) => invoke(action, params),
            None => Err(ActionError::UnknownAction(name.to_string())),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        if let Err(err) = &result {
            self.sink.log(
                Level::ERROR,
                &format!("Action '{}' failed [{}]: {}", name, err.kind(), err),
            );
        }

        let result = ActionResult::from(result);
        let details = match result.failure {
            Some(kind) => json!({ "duration_ms": duration_ms, "failure": kind }),
            None => json!({ "duration_ms": duration_ms }),
        };
        self.sink
            .lifecycle(&LifecycleEvent::end(name, result.outcome).with_details(details));

        result
    }

    /// Names of every registered action, sorted.
    pub fn actions(&self) -> Vec<ActionName> {
        self.registry.names().collect()
    }
}

/// Call `execute`, converting a panic into `UnexpectedFailure`.
fn invoke(action: &dyn Action, params: Option<&ActionParams>) -> Result<ActionOutput, ActionError> {
    panic::catch_unwind(AssertUnwindSafe(|| action.execute(params))).unwrap_or_else(|payload| {
        Err(ActionError::UnexpectedFailure(format!(
            "action '{}' panicked: {}",
            action.name(),
            panic_message(payload.as_ref())
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
