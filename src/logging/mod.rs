//! Logging System for LaunchNavigator
//!
//! The facade emits `tracing` events for every bridge dispatch and resolution.
//! Hosts that have no subscriber of their own can install one from here:
//! - Structured logs with configurable verbosity levels
//! - Text or JSON output to console, a rolling file, or both

mod config;


pub use self::config::{LogFormat, LogLevel, LogOutput, LoggingConfig, RotationStrategy};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging system errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationError(String),

    #[error("Invalid filter directive: {0}")]
    InvalidDirective(String),
}

/// Result type for logging operations
pub type LoggingResult<T> = Result<T, LoggingError>;

/// Installed global subscriber; keep it alive so file output is flushed
pub struct LoggingSystem {
    config: LoggingConfig,
    _guards: Vec<WorkerGuard>,
}

impl LoggingSystem {
    /// Initialize the logging system with the given configuration
    pub fn init(config: LoggingConfig) -> LoggingResult<Self> {
        let mut guards = Vec::new();
        let env_filter = build_env_filter(&config)?;
        let registry = tracing_subscriber::registry().with(env_filter);

        match config.output {
            LogOutput::Console => {
                registry
                    .with(console_layer(&config))
                    .try_init()
                    .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
            }
            LogOutput::File => {
                let (layer, guard) = file_layer(&config)?;
                guards.push(guard);
                registry
                    .with(layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
            }
            LogOutput::Both => {
                let (layer, guard) = file_layer(&config)?;
                guards.push(guard);
                registry
                    .with(console_layer(&config))
                    .with(layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
            }
        }

        tracing::debug!(level = %config.level, output = ?config.output, "Logging initialized");

        Ok(Self {
            config,
            _guards: guards,
        })
    }

    /// Get current log level
    pub fn log_level(&self) -> LogLevel {
        self.config.level
    }

    /// Directory file output goes to, if file output is enabled
    pub fn log_directory(&self) -> Option<std::path::PathBuf> {
        match self.config.output {
            LogOutput::Console => None,
            _ => Some(self.config.resolved_log_directory()),
        }
    }
}

/// Build environment filter from configuration.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn build_env_filter(config: &LoggingConfig) -> LoggingResult<EnvFilter> {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level)
            .parse()
            .map_err(|_| LoggingError::InvalidDirective(format!("{}={}", module, level)))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

fn console_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_target(config.include_target)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info);

    if config.format == LogFormat::Json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn file_layer<S>(
    config: &LoggingConfig,
) -> LoggingResult<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let log_dir = config.resolved_log_directory();
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        LoggingError::DirectoryCreationError(format!("{}: {}", log_dir.display(), e))
    })?;

    let rotation = match config.rotation {
        RotationStrategy::Hourly => Rotation::HOURLY,
        RotationStrategy::Daily => Rotation::DAILY,
        RotationStrategy::Never => Rotation::NEVER,
    };

    let appender = RollingFileAppender::new(rotation, &log_dir, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(config.include_target)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info)
        .with_ansi(false);

    if config.format == LogFormat::Json {
        Ok((layer.json().boxed(), guard))
    } else {
        Ok((layer.boxed(), guard))
    }
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> LoggingResult<LoggingSystem> {
    LoggingSystem::init(LoggingConfig::default())
}

/// Initialize logging with custom configuration
pub fn init_logging(config: LoggingConfig) -> LoggingResult<LoggingSystem> {
    LoggingSystem::init(config)
}
