//! Actuator: a minimal action-execution agent.
//!
//! A caller asks the [`dispatch::Dispatcher`] to run an action by name. The
//! dispatcher resolves the name in a static [`dispatch::Registry`], emits a
//! Start lifecycle event, runs the action, classifies any failure, emits an
//! End event carrying the outcome, and returns an [`action::ActionResult`].
//!
//! ```no_run
//! use actuator::config::Config;
//! use actuator::dispatch::{Dispatcher, Registry};
//! use actuator::logging::{LogSink, TracingSink};
//! use std::sync::Arc;
//!
//! let config = Config::default();
//! let sink: Arc<dyn LogSink> = Arc::new(TracingSink::from_config(&config));
//! let dispatcher = Dispatcher::new(Registry::builtin(&config, sink.clone()), sink);
//!
//! let result = dispatcher.dispatch("list_directory", None);
//! std::process::exit(result.exit_code());
//! ```

pub mod action;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod logging;
