//! `tracing`-backed sink and the process-wide subscriber setup.

use super::{Level, LogSink};
use crate::config::Config;
use crate::error::{AgentError, Result};
use crate::events::{LifecycleEvent, append_event};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sink that forwards records to the installed `tracing` subscriber.
///
/// Lifecycle events are additionally appended to `events_file` as NDJSON when
/// one is configured. A failed append is reported at WARN and otherwise
/// ignored; the log stream never fails a dispatch.
#[derive(Debug, Default)]
pub struct TracingSink {
    events_file: Option<PathBuf>,
    events_lock: Mutex<()>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append lifecycle events to `path`.
    pub fn with_events_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.events_file = Some(path.into());
        self
    }

    pub fn from_config(config: &Config) -> Self {
        match &config.events_file {
            Some(path) => Self::new().with_events_file(path),
            None => Self::new(),
        }
    }
}

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{message}"),
            Level::WARN => tracing::warn!("{message}"),
            Level::INFO => tracing::info!("{message}"),
            Level::DEBUG => tracing::debug!("{message}"),
            _ => tracing::trace!("{message}"),
        }
    }

    fn lifecycle(&self, event: &LifecycleEvent) {
        tracing::info!(
            phase = %event.phase,
            action = %event.action,
            outcome = ?event.outcome,
            "{}",
            event.summary()
        );

        if let Some(path) = &self.events_file {
            let _guard = self.events_lock.lock().unwrap_or_else(|p| p.into_inner());
            if let Err(e) = append_event(path, event) {
                tracing::warn!("{e}");
            }
        }
    }
}

/// Install the global subscriber: stdout plus an append-mode log file.
///
/// The level is DEBUG when `config.debug` is set and INFO otherwise, unless
/// `RUST_LOG` is set, in which case its directives win. Call once, at startup.
pub fn init_subscriber(config: &Config) -> Result<()> {
    let level = if config.debug { Level::DEBUG } else { Level::INFO };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|e| {
            AgentError::LoggingError(format!(
                "failed to open log file '{}': {}",
                config.log_file.display(),
                e
            ))
        })?;

    tracing_subscriber::registry()
        .with(env_filter(
            level,
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| AgentError::LoggingError(format!("failed to install log subscriber: {}", e)))
}

/// `directives` (the `RUST_LOG` value) if given, else `level` for everything.
fn env_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Outcome;
    use crate::events::Phase;
    use tempfile::TempDir;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn lifecycle_events_are_appended_to_events_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.ndjson");
        let sink = TracingSink::new().with_events_file(&path);

        sink.lifecycle(&LifecycleEvent::start("list_directory"));
        sink.lifecycle(&LifecycleEvent::end("list_directory", Outcome::Succeeded));

        let content = std::fs::read_to_string(&path).unwrap();
        let events: Vec<LifecycleEvent> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].phase, Phase::Start);
        assert_eq!(events[1].phase, Phase::End);
    }

    #[test]
    fn unwritable_events_file_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let sink = TracingSink::new().with_events_file(temp_dir.path());

        sink.lifecycle(&LifecycleEvent::start("list_directory"));
        sink.log(Level::ERROR, "still alive");
    }

    #[test]
    fn from_config_picks_up_events_file() {
        let mut config = Config::default();
        assert!(TracingSink::from_config(&config).events_file.is_none());

        config.events_file = Some(PathBuf::from("events.ndjson"));
        assert_eq!(
            TracingSink::from_config(&config).events_file,
            Some(PathBuf::from("events.ndjson"))
        );
    }

    #[test]
    fn filter_defaults_to_configured_level() {
        assert_eq!(env_filter(Level::INFO, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(Level::DEBUG, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_directives_override_configured_level() {
        assert_eq!(
            env_filter(Level::DEBUG, Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            env_filter(Level::INFO, Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn subscriber_writes_to_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            log_file: temp_dir.path().join("agent.log"),
            ..Config::default()
        };

        init_subscriber(&config).unwrap();
        TracingSink::new().log(Level::INFO, "subscriber smoke test marker");

        let content = std::fs::read_to_string(&config.log_file).unwrap();
        assert!(content.contains("subscriber smoke test marker"));
        assert!(content.contains("INFO"));
    }

    #[test]
    fn missing_log_directory_is_logging_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            log_file: temp_dir.path().join("no").join("such").join("agent.log"),
            ..Config::default()
        };

        let err = init_subscriber(&config).unwrap_err();
        assert!(matches!(err, AgentError::LoggingError(_)));
    }
}
