//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. Output goes to
//! stderr, as human-readable lines or JSON.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter {directives:?}: {source}")]
    InvalidFilter {
        directives: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Install the global subscriber
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    let directives = filter_directives(config, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    EnvFilter::try_new(&directives)
        .map_err(|source| LoggingError::InvalidFilter { directives, source })
}

fn filter_directives(config: &LogConfig, from_env: Option<String>) -> String {
    from_env
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| config.level.clone())
}
