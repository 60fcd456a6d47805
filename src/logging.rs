//! Logging setup.
//!
//! The trie emits `tracing` events; nothing is printed unless the embedding
//! application installs a subscriber. [`init_logging`] installs the standard
//! `fmt` subscriber configured from a [`LogConfig`].

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{NiihauError, NiihauResult};

/// Builds the event filter: `RUST_LOG` wins when set, otherwise the
/// configured level applies.
pub fn build_env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `config` - Level, output format and source-location settings
///
/// # Returns
///
/// * `Ok(())` if the subscriber was installed
/// * `Err(NiihauError::Logging)` if a global subscriber is already set
pub fn init_logging(config: &LogConfig) -> NiihauResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config))
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_names(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| NiihauError::Logging(format!("Failed to set global tracing subscriber: {e}")))
}
