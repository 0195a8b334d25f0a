use super::config::{LogConfig, LogFormat};
use anyhow::{Context, Result};
use tracing::subscriber::{DefaultGuard, NoSubscriber};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::{EnvFilter, Layer};

/// Diagnostic sink for one helper invocation.
///
/// Opening the sink installs it as the default subscriber of the current
/// thread. Dropping it uninstalls the subscriber, flushes buffered lines and
/// closes the file, so every return path out of `main` releases it.
pub struct LogSink {
    // Field order matters: the subscriber is released before the writer
    // guard flushes.
    _default: DefaultGuard,
    guard: Option<WorkerGuard>,
}

impl LogSink {
    /// Open the log file described by `config` in append mode.
    ///
    /// # Errors
    /// Returns an error if the level is invalid or the file cannot be opened
    pub fn open(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;

        let Some(ref log_dir) = config.log_dir else {
            return Ok(Self::disabled());
        };

        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        // Rotation::NEVER keeps a single file named exactly `file_name`,
        // opened for append.
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(config.file_name.as_str())
            .build(log_dir)
            .with_context(|| {
                format!(
                    "Failed to open log file {}",
                    log_dir.join(&config.file_name).display()
                )
            })?;

        let (writer, guard) = tracing_appender::non_blocking(file_appender);

        let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter)
                .boxed(),
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter)
                .boxed(),
        };

        let default = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            file = %log_dir.join(&config.file_name).display(),
            "log sink opened"
        );

        Ok(Self {
            _default: default,
            guard: Some(guard),
        })
    }

    /// Sink that drops every event.
    ///
    /// Used when logging is switched off or the log file cannot be opened;
    /// stdout must stay clean either way.
    pub fn disabled() -> Self {
        Self {
            _default: tracing::subscriber::set_default(NoSubscriber::default()),
            guard: None,
        }
    }

    /// Whether events reach a file
    pub const fn is_enabled(&self) -> bool {
        self.guard.is_some()
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
