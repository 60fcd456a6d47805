//! Data structures for the Niihau Trie crate.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Single-owner, synchronous operations with no hidden locking
//! - O(key length) cost per operation

pub mod niihau_trie;

// Re-export common data structures
pub use niihau_trie::{NiihauTrie, NiihauTrieConfig};
