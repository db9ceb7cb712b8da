//! Log subscriber setup. The TUI owns the terminal, so logs only ever go to
//! a file.

use std::fs;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::LoggingConfig;

/// Overrides `logging.level` with a full filter directive.
pub const LOG_ENV: &str = "LINKDECK_LOG";

/// Keeps the non-blocking writer alive; drop it last to flush.
pub struct TelemetryGuard {
    guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl TelemetryGuard {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }
}

pub fn init(config: &LoggingConfig) -> Result<TelemetryGuard, String> {
    let Some(file) = config.file.as_deref() else {
        return Ok(TelemetryGuard { guard: None });
    };
    let (dir, name) = split_log_path(file)?;
    fs::create_dir_all(dir)
        .map_err(|err| format!("log dir init failed for {}: {err}", dir.display()))?;

    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(&config.level).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| format!("install log subscriber: {err}"))?;

    tracing::info!(file = %file.display(), "logging initialized");
    Ok(TelemetryGuard {
        guard: Some(guard),
    })
}

/// Unknown levels fall back to `info`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

fn split_log_path(file: &Path) -> Result<(&Path, &std::ffi::OsStr), String> {
    let name = file
        .file_name()
        .ok_or_else(|| format!("log file has no name: {}", file.display()))?;
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_is_lenient() {
        assert_eq!(parse_level(" DEBUG "), LevelFilter::DEBUG);
        assert_eq!(parse_level("warning"), LevelFilter::WARN);
        assert_eq!(parse_level("chatty"), LevelFilter::INFO);
    }

    #[test]
    fn disabled_file_logging_installs_nothing() {
        let config = LoggingConfig {
            level: "debug".into(),
            file: None,
        };
        let guard = match init(&config) {
            Ok(guard) => guard,
            Err(err) => panic!("init: {err}"),
        };
        assert!(!guard.is_active());
    }

    #[test]
    fn bare_file_name_logs_to_cwd() {
        let (dir, name) = match split_log_path(Path::new("linkdeck.log")) {
            Ok(parts) => parts,
            Err(err) => panic!("split: {err}"),
        };
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "linkdeck.log");
    }
}
