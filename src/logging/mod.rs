//! Console and rotating-file logging
//!
//! Library code only emits `tracing` events. The binary decides where they
//! go: stderr at a verbosity chosen by `-v`, and optionally a size-rotated
//! file at INFO and above. The file sink is an explicit [`RotatingLog`] value
//! built from configuration, not a process-wide singleton.

pub mod rotating;

pub use rotating::{RotatingLog, RotationPolicy, TIMESTAMP_FORMAT};

use crate::config::LoggingConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

impl From<&LoggingConfig> for RotationPolicy {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            file_name: config.file_name.clone(),
            max_file_size: config.max_file_size,
            max_backups: config.max_backups,
        }
    }
}

/// Open the configured log file, or `None` when file logging is disabled
pub fn open_log_file(config: &LoggingConfig) -> std::io::Result<Option<RotatingLog>> {
    if !config.enabled {
        return Ok(None);
    }
    RotatingLog::open(config.into()).map(Some)
}

/// Console filter for a `-v` count, unless `RUST_LOG` is set
pub fn console_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv shows everything
    })
}

/// Install the global subscriber
///
/// Quiet mode drops the console layer but keeps the file. Safe to call more
/// than once; later calls are ignored.
pub fn init(verbose: u8, quiet: bool, file: Option<RotatingLog>) {
    let console = (!quiet).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_filter(verbose))
    });

    let file = file.map(|log| {
        fmt::layer()
            .with_writer(log)
            .with_ansi(false)
            .with_target(false)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
            .with_filter(LevelFilter::INFO)
    });

    if tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_disabled_config_opens_nothing() {
        let config = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(open_log_file(&config).unwrap().is_none());
    }

    #[test]
    fn test_policy_from_config() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("out"),
            max_backups: 2,
            ..LoggingConfig::default()
        };
        let log = open_log_file(&config).unwrap().unwrap();
        assert_eq!(log.path(), dir.path().join("out").join("app.log"));
        assert!(log.path().exists());
    }
}
