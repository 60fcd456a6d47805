//! Error module for the Niihau Trie crate.
//!
//! Trie operations themselves never fail: missing or duplicate keys are
//! ordinary `bool`/`Option` results. The errors here cover the ambient
//! machinery around the trie, namely configuration loading, writing the
//! default configuration file and logging setup.
//!
//! Failures that [`crate::init`] cannot hand back to a caller in a useful
//! form are also passed to a process-wide [`ErrorReporter`].

use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

use thiserror::Error;

pub mod config;

/// Result type alias used throughout the crate.
pub type NiihauResult<T> = Result<T, NiihauError>;

/// Core error enum for the crate.
#[derive(Error, Debug)]
pub enum NiihauError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Filesystem errors, e.g. while writing a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// A borrowed view of an error plus where it happened.
///
/// The reporter only looks at the error; ownership stays with the caller so
/// the same error can still be returned after it was reported.
#[derive(Debug)]
pub struct ErrorContext<'a> {
    /// The error being reported.
    pub error: &'a NiihauError,

    /// Name of the component that hit the error, e.g. `"init"`.
    pub component: &'static str,

    /// Free-form detail such as the file being loaded.
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    /// Creates a context for `error` raised in `component`.
    pub fn new(error: &'a NiihauError, component: &'static str) -> Self {
        Self {
            error,
            component,
            details: None,
        }
    }

    /// Attaches detail text.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

/// Sink for errors that are reported rather than (or as well as) returned.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Handle one reported error.
    fn report(&self, context: &ErrorContext<'_>);
}

/// Reports errors as `tracing` events at error level.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: &ErrorContext<'_>) {
        tracing::error!(
            error = %context.error,
            component = context.component,
            details = context.details.as_deref(),
            "niihau error"
        );
    }
}

static REPORTER: RwLock<Option<Arc<dyn ErrorReporter>>> = RwLock::new(None);

/// Passes `context` to the installed reporter, or prints it to stderr when
/// none is installed.
pub fn report_error(context: &ErrorContext<'_>) {
    let reporter = REPORTER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();

    match reporter {
        Some(reporter) => reporter.report(context),
        None => eprintln!("niihau error in {context}"),
    }
}

/// Returns `true` if a process-wide reporter is installed.
pub fn has_error_reporter() -> bool {
    REPORTER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .is_some()
}

/// Installs `reporter`, replacing any previous one.
pub fn set_error_reporter(reporter: Arc<dyn ErrorReporter>) {
    *REPORTER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(reporter);
}

/// Installs `reporter` only if no reporter is set yet.
///
/// The check and the install happen under one lock, so a reporter set
/// concurrently by the application is never overwritten.
///
/// # Returns
///
/// `true` if `reporter` was installed.
pub fn set_default_error_reporter(reporter: Arc<dyn ErrorReporter>) -> bool {
    let mut slot = REPORTER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if slot.is_some() {
        return false;
    }
    *slot = Some(reporter);
    true
}
