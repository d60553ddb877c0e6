//! The name → action table.

use crate::action::{Action, ActionName, ListDirectoryAction};
use crate::config::Config;
use crate::logging::LogSink;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Static mapping from [`ActionName`] to the action bound to it.
///
/// Built once at startup, then handed to the dispatcher, which only reads it.
#[derive(Default)]
pub struct Registry {
    actions: BTreeMap<ActionName, Box<dyn Action>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` under its own name, replacing any earlier binding.
    pub fn with(mut self, action: impl Action + 'static) -> Self {
        self.actions.insert(action.name(), Box::new(action));
        self
    }

    /// The built-in table: `list_directory → ListDirectoryAction`.
    pub fn builtin(config: &Config, sink: Arc<dyn LogSink>) -> Self {
        Self::new().with(ListDirectoryAction::from_config(config, sink))
    }

    /// Resolve a requested name. Names outside the known set resolve to `None`
    /// just like known names with no binding.
    pub fn resolve(&self, name: &str) -> Option<&dyn Action> {
        ActionName::from_str(name).and_then(|n| self.get(n))
    }

    pub fn get(&self, name: ActionName) -> Option<&dyn Action> {
        self.actions.get(&name).map(|a| &**a)
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = ActionName> + '_ {
        self.actions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
