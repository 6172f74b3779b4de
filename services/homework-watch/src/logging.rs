//! Log sink setup: stdout and a rotating file

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogRotation, LoggingConfig};

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Build the rotating file appender described by `config`, if any
pub fn file_appender(config: &LoggingConfig) -> crate::Result<Option<RollingFileAppender>> {
    let Some(prefix) = &config.file else {
        return Ok(None);
    };

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(prefix)
        .max_log_files(config.max_files.max(1))
        .build(&config.directory)
        .map_err(|e| {
            crate::WatchError::Config(format!(
                "Failed to open log file {:?} in {:?}: {}",
                prefix, config.directory, e
            ))
        })?;
    Ok(Some(appender))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file sink on drop and must live as long as
/// the process logs.
pub fn init(config: &LoggingConfig, level: Level) -> crate::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match file_appender(config)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let stdout_layer = config.stdout.then(|| fmt::layer().with_line_number(true));

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::WatchError::Config(format!("Failed to initialise logging: {}", e)))?;

    Ok(guard)
}
