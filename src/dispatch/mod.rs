//! Action dispatch.
//!
//! - **Registry**: static `ActionName → Action` table built at startup
//! - **Dispatcher**: resolves a requested name and runs it between a Start
//!   and an End lifecycle event, reducing every outcome to an `ActionResult`

mod dispatcher;
mod registry;


pub use dispatcher::Dispatcher;
pub use registry::Registry;
