//! Niihau Trie Library
//!
//! An in-memory associative container mapping string keys to arbitrary
//! values through a character-indexed prefix tree. Keys sharing a prefix
//! share nodes, and deleting a key prunes every node that no longer leads
//! to a stored key.
//!
//! # Architecture
//!
//! - [`data_structures::NiihauTrie`] is the container itself
//! - [`config`] loads layered settings (defaults, file, environment)
//! - [`error`] holds the error types and the pluggable error reporter
//! - [`logging`] installs a `tracing` subscriber from configuration
//!
//! # Example
//!
//! ```
//! use niihau_trie::NiihauTrie;
//!
//! let mut trie = NiihauTrie::new();
//! trie.insert("to", 1);
//! trie.insert("tea", 2);
//! trie.insert("ten", 3);
//!
//! assert_eq!(trie.delete("te"), None);
//! assert_eq!(trie.delete("tea"), Some(2));
//! assert_eq!(trie.lookup("ten"), Some(&3));
//! assert_eq!(trie.len(), 2);
//! ```

pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::{NiihauTrie, NiihauTrieConfig};

use std::sync::Arc;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Loads the default configuration (see [`config::init_default_config`]),
/// installs the tracing subscriber it describes, and registers the
/// [`error::TracingErrorReporter`] unless the application already set a
/// reporter. A subscriber installed earlier by the application is kept.
///
/// A missing configuration file is logged as a warning once the subscriber
/// is in place. A configuration that fails to load is reported through
/// [`error::report_error`] and returned.
pub fn init() -> error::NiihauResult<config::NiihauConfig> {
    let (config, source) = config::init_default_config().map_err(|e| {
        let error = error::NiihauError::from(e);
        error::report_error(
            &error::ErrorContext::new(&error, "init")
                .with_details(format!("loading {}", config::DEFAULT_CONFIG_PATH)),
        );
        error
    })?;

    if let Err(e) = logging::init_logging(&config.log) {
        tracing::debug!(error = %e, "keeping the existing tracing subscriber");
    }

    error::set_default_error_reporter(Arc::new(error::TracingErrorReporter));

    if source == config::ConfigSource::Defaults {
        tracing::warn!(
            path = config::DEFAULT_CONFIG_PATH,
            "configuration file not found, using defaults and environment"
        );
    }

    tracing::info!(version = VERSION, "niihau_trie initialized");

    Ok(config)
}
