//! Actions: named units of work the dispatcher can run.
//!
//! - **Types**: `ActionName`, `ActionParams`, `ActionOutput`, `ActionResult`
//! - **Error**: the failure taxonomy (`ActionError`, `FailureKind`)
//! - **Process**: subprocess execution with timeout and output capture
//! - **ListDirectory**: the built-in `list_directory` action
//!
//! An action wraps exactly one externally observable effect. It never panics
//! on purpose and never lets a fault escape as anything but an `ActionError`.

mod error;
mod list_directory;
pub mod process;
mod types;

pub use error::{ActionError, FailureKind};
pub use list_directory::{ListDirectoryAction, PATH_PARAM};
pub use types::{ActionName, ActionOutput, ActionParams, ActionResult, Outcome};

/// A unit of work bound to one name in the registry.
pub trait Action: Send + Sync {
    /// The registry key this action answers to.
    fn name(&self) -> ActionName;

    /// Perform the effect. `params` is passed through from the caller untouched.
    fn execute(&self, params: Option<&ActionParams>) -> Result<ActionOutput, ActionError>;
}
