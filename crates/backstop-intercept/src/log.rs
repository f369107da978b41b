//! Logging collaborator and operator-facing channel.
//!
//! The interceptor never talks to a logging backend directly; it writes
//! through the injected [`LogSink`] trait. The sink is fire-and-forget by
//! contract - a sink that cannot write must swallow the failure rather than
//! surface it on the client path.

use backstop_core::FaultContext;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Sink for fault records.
///
/// `error` must not fail and must not block fault handling; implementations
/// swallow their own I/O problems.
pub trait LogSink: Send + Sync {
    /// Records a fault at error severity with contextual variables.
    fn error(&self, message: &str, context: &FaultContext);
}

/// [`LogSink`] implementation forwarding to [`tracing::error!`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn error(&self, message: &str, context: &FaultContext) {
        if context.is_empty() {
            tracing::error!("{}", message);
        } else {
            tracing::error!(context = ?context, "{}", message);
        }
    }
}

/// Logging configuration for the operator-facing channel.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "backstop=debug").
    pub level: String,
    /// Whether to output JSON format.
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
        }
    }
}

impl LogConfig {
    /// Development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
        }
    }
}

/// Error initializing the logging subsystem.
#[derive(Debug, Error)]
#[error("failed to initialize logging: {0}")]
pub struct LogInitError(String);

/// Initializes the global tracing subscriber.
///
/// Call once at process bootstrap, before constructing the interceptor.
///
/// # Errors
///
/// Returns [`LogInitError`] if the level filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), LogInitError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LogInitError(format!("invalid log level: {e}")))?;

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer().json().with_filter(filter);
        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LogInitError(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().pretty().with_filter(filter);
        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LogInitError(e.to_string()))?;
    }

    Ok(())
}
