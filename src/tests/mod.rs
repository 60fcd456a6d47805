//! Test modules for the Niihau Trie crate.
//!
//! This module contains the crate-internal test suite:
//! - Configuration loading and validation tests
//! - Error type and reporter tests
//! - Library initialisation tests
//! - Property-based tests of the trie against a `HashMap` model
//! - Shared proptest strategies and fixtures

pub mod error_tests;

pub use test_utils::{key_strategy, operation_strategy, TestFixture, TrieOp};
