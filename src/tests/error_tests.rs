//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::error::config::ConfigError;
use crate::error::{
    has_error_reporter, report_error, set_default_error_reporter, set_error_reporter,
    ErrorContext, ErrorReporter, NiihauError, TracingErrorReporter,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = NiihauError::Logging("subscriber already set".to_string());
    let context = ErrorContext::new(&error, "logging").with_details("second install");

    assert_eq!(
        context.to_string(),
        "logging: Logging error: subscriber already set (second install)"
    );
    assert_eq!(
        ErrorContext::new(&error, "logging").to_string(),
        "logging: Logging error: subscriber already set"
    );
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let niihau_error = NiihauError::from(io_error);
    assert!(format!("{niihau_error}").contains("file not found"));

    let config_error = ConfigError::FileNotFound(PathBuf::from("config/niihau.toml"));
    let niihau_error = NiihauError::from(config_error);
    let error_string = format!("{niihau_error}");
    assert!(error_string.starts_with("Configuration error"));
    assert!(error_string.contains("config/niihau.toml"));
}

/// Test the messages of the structured configuration errors.
#[test]
fn test_config_error_display() {
    let err = ConfigError::ValueOutOfRange {
        key: "trie.child_capacity".to_string(),
        message: "2048 exceeds the maximum of 1024".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Configuration value trie.child_capacity is out of valid range: 2048 exceeds the maximum of 1024"
    );

    let err = ConfigError::ValidationError("Invalid log level: loud".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration validation error: Invalid log level: loud"
    );
}

/// Reporter that records the rendered contexts it receives.
#[derive(Debug, Default)]
struct RecordingReporter {
    seen: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: &ErrorContext<'_>) {
        self.seen.lock().unwrap().push(context.to_string());
    }
}

/// Test that the global error reporter receives reports and that a default
/// reporter never replaces it.
///
/// Note: this is the only test that calls `set_error_reporter`. `init` may
/// run concurrently, but it only installs a reporter when none is set.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(RecordingReporter::default());
    set_error_reporter(reporter.clone());
    assert!(has_error_reporter());

    assert!(!set_default_error_reporter(Arc::new(TracingErrorReporter)));

    let error = NiihauError::from(ConfigError::ValidationError("bad level".to_string()));
    report_error(&ErrorContext::new(&error, "init").with_details("loading niihau.toml"));

    let seen = reporter.seen();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("init: Configuration error"));
    assert!(seen[0].ends_with("(loading niihau.toml)"));

    // The reported error is still owned by the caller
    assert!(matches!(error, NiihauError::Config(ConfigError::ValidationError(_))));
}

/// Test that the tracing error reporter accepts contexts with and without details.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let error = NiihauError::Logging("subscriber already set".to_string());

    // Just make sure this doesn't panic
    reporter.report(&ErrorContext::new(&error, "logging"));
    reporter.report(&ErrorContext::new(&error, "logging").with_details("second install"));
}
