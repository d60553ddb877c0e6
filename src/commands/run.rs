//! Implementation of `actuator run`.

use crate::action::ActionParams;
use crate::cli::RunArgs;
use crate::dispatch::Dispatcher;
use crate::error::{AgentError, Result};
use crate::logging::{Level, LogSink};
use serde_json::Value;

/// Execute the `run` command.
///
/// Parses parameters, dispatches the action, and returns the exit code for
/// its outcome. Malformed parameters are a user error and nothing is
/// dispatched.
pub fn cmd_run(dispatcher: &Dispatcher, sink: &dyn LogSink, args: RunArgs) -> Result<i32> {
    let params = parse_params(&args.params, args.params_json.as_deref())?;

    sink.log(Level::INFO, "Agent process started.");
    let result = dispatcher.dispatch(&args.action, params.as_ref());
    sink.log(Level::INFO, "Agent process finished.");

    Ok(result.exit_code())
}

/// Build the parameter bag from `--params-json` and `--param KEY=VALUE`.
///
/// Returns `None` when neither was given, so the action sees "no params"
/// rather than an empty map.
pub fn parse_params(pairs: &[String], json: Option<&str>) -> Result<Option<ActionParams>> {
    if pairs.is_empty() && json.is_none() {
        return Ok(None);
    }

    let mut params = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            Ok(other) => {
                return Err(AgentError::UserError(format!(
                    "--params-json must be a JSON object, got: {}",
                    other
                )));
            }
            Err(e) => {
                return Err(AgentError::UserError(format!(
                    "--params-json is not valid JSON: {}",
                    e
                )));
            }
        },
        None => ActionParams::new(),
    };

    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            AgentError::UserError(format!(
                "--param expects KEY=VALUE, got '{}'",
                pair
            ))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AgentError::UserError(format!(
                "--param has an empty key in '{}'",
                pair
            )));
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        params.insert(key.to_string(), value);
    }

    Ok(Some(params))
}
