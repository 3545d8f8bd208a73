// tms-cli/src/logging.rs
// ============================================================================
// Module: TMS Logging Setup
// Description: tracing-subscriber installation from `[logging]` config.
// Purpose: Select the level filter and output format once per process.
// Dependencies: tms-config, tracing-subscriber
// ============================================================================

//! ## Overview
//! `RUST_LOG` wins over `logging.level` when it is set and parses; otherwise
//! the configured level applies. Output goes to stderr as compact text or one
//! JSON object per line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tms_config::LogFormat;
use tms_config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Builds the level filter from `RUST_LOG` or the configured level.
///
/// # Errors
///
/// Returns [`LoggingError::Filter`] when the configured level does not parse.
pub fn env_filter(
    config: &LoggingConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, LoggingError> {
    if let Some(directives) = rust_log.map(str::trim).filter(|value| !value.is_empty())
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|err| LoggingError::Filter(err.to_string()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`LoggingError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(config, rust_log.as_deref())?;
    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => {
            registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
        }
        LogFormat::Text => {
            registry.with(fmt::layer().compact().with_writer(std::io::stderr)).try_init()
        }
    };
    result.map_err(|err| LoggingError::Init(err.to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level filter did not parse.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// The subscriber could not be installed.
    #[error("logging init failed: {0}")]
    Init(String),
}
