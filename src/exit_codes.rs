//! Exit code constants for the actuator CLI.
//!
//! - 0: Action succeeded (or `list` completed)
//! - 1: Action failed (any classified failure, including unknown action)
//! - 2: User error (malformed parameters or arguments)
//! - 3: Configuration error (unreadable, unparseable, or invalid config)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The dispatched action finished with a failed outcome.
pub const ACTION_FAILED: i32 = 1;

/// User error: malformed `--param`/`--params-json` input.
pub const USER_ERROR: i32 = 2;

/// Configuration could not be loaded or failed validation.
pub const CONFIG_ERROR: i32 = 3;
