// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Niihau Trie Implementation
//!
//! This module provides a character-indexed prefix tree mapping string keys
//! to arbitrary values. Every operation walks at most one edge per character
//! of the key, so cost is O(key length) regardless of how many keys are
//! stored.
//!
//! Nodes are created lazily by [`NiihauTrie::insert`] and
//! [`NiihauTrie::create`], and removed by [`NiihauTrie::delete`] as soon as
//! they are neither terminal nor the ancestor of a terminal node.

mod node;

use std::fmt;

use serde::{Deserialize, Serialize};

use node::TrieNode;

/// Upper bound accepted for [`NiihauTrieConfig::child_capacity`].
pub const MAX_CHILD_CAPACITY: usize = 1024;

/// Configuration options for the Niihau Trie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiihauTrieConfig {
    /// Number of child slots reserved when a node is created.
    ///
    /// Zero defers allocation of the child map until the first child is
    /// attached, which is the cheapest choice for sparse key sets.
    pub child_capacity: usize,
}

impl NiihauTrieConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of child slots reserved for each new node.
    ///
    /// # Arguments
    ///
    /// * `child_capacity` - Reserved slots, clamped to [`MAX_CHILD_CAPACITY`].
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_child_capacity(mut self, child_capacity: usize) -> Self {
        self.child_capacity = child_capacity.min(MAX_CHILD_CAPACITY);
        self
    }
}

impl Default for NiihauTrieConfig {
    fn default() -> Self {
        Self { child_capacity: 0 }
    }
}

/// Niihau Trie maps string keys to values through a tree of single-character
/// edges.
///
/// Key features:
/// * Exact-key create, upsert, lookup, update and delete
/// * Shared storage for common prefixes
/// * Prune-on-delete: memory stays bounded by the live keys and their prefixes
/// * Zero-length keys are valid and live on the root node
///
/// The trie is a plain single-owner value. Mutation requires `&mut self`;
/// callers that share one instance across threads wrap it in their own lock.
///
/// # Examples
///
/// ```
/// use niihau_trie::NiihauTrie;
///
/// let mut trie = NiihauTrie::new();
/// assert_eq!(trie.insert("tea", 2), None);
/// assert_eq!(trie.insert("tea", 3), Some(2));
/// assert!(trie.create("ten", 4));
/// assert!(!trie.create("ten", 5));
///
/// assert_eq!(trie.lookup("te"), None);
/// assert_eq!(trie.delete("tea"), Some(3));
/// assert_eq!(trie.len(), 1);
/// ```
#[derive(Clone)]
pub struct NiihauTrie<V> {
    /// The node for the empty prefix
    root: TrieNode<V>,

    /// Number of terminal nodes
    size: usize,

    /// Configuration options
    config: NiihauTrieConfig,
}

impl<V> NiihauTrie<V> {
    /// Creates a new empty `NiihauTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(NiihauTrieConfig::default())
    }

    /// Creates a new empty `NiihauTrie` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: NiihauTrieConfig) -> Self {
        Self {
            root: TrieNode::with_capacity(config.child_capacity),
            size: 0,
            config,
        }
    }

    /// Returns the configuration this trie was created with.
    pub fn config(&self) -> &NiihauTrieConfig {
        &self.config
    }

    /// Returns the number of keys stored in the trie.
    ///
    /// The count is maintained incrementally, so this is O(1).
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie stores no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes currently allocated, root included.
    ///
    /// This walks the whole tree, so it's an O(n) operation. An empty trie
    /// has exactly one node.
    pub fn node_count(&self) -> usize {
        self.root.subtree_nodes()
    }

    /// Returns `true` if the trie contains the exact key.
    ///
    /// The walk stops at the first character without a matching edge.
    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        self.find_node(key.as_ref())
            .is_some_and(TrieNode::is_terminal)
    }

    /// Retrieves the value stored for an exact key.
    ///
    /// # Returns
    ///
    /// * `Some(&V)` - The value, if `key` is stored.
    /// * `None` - If the path is missing or ends on a node that is only a
    ///   prefix of other keys.
    pub fn lookup<K>(&self, key: K) -> Option<&V>
    where
        K: AsRef<str>,
    {
        self.find_node(key.as_ref())
            .and_then(|node| node.value.as_ref())
    }

    /// Retrieves a mutable reference to the value stored for an exact key.
    ///
    /// Never creates nodes and never changes the key count.
    pub fn lookup_mut<K>(&mut self, key: K) -> Option<&mut V>
    where
        K: AsRef<str>,
    {
        self.find_node_mut(key.as_ref())
            .and_then(|node| node.value.as_mut())
    }

    /// Inserts a key-value pair, replacing any existing value (upsert).
    ///
    /// Missing nodes along the path are created.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    /// * `value` - The value to associate with the key.
    ///
    /// # Returns
    ///
    /// * `Some(V)` - The value previously stored for `key`.
    /// * `None` - If `key` was not stored before.
    pub fn insert<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let node = Self::descend_or_create(&mut self.root, key, self.config.child_capacity);
        let previous = node.value.replace(value);

        if previous.is_none() {
            self.size += 1;
        }

        tracing::trace!(
            key_chars = key.chars().count(),
            replaced = previous.is_some(),
            size = self.size,
            "niihau_trie insert"
        );

        previous
    }

    /// Stores a value only if the key is absent.
    ///
    /// Missing nodes along the path are created. An existing value is never
    /// replaced; in that case `value` is dropped.
    ///
    /// # Returns
    ///
    /// * `true` - If the key was added.
    /// * `false` - If the key was already stored.
    pub fn create<K>(&mut self, key: K, value: V) -> bool
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let node = Self::descend_or_create(&mut self.root, key, self.config.child_capacity);

        if node.is_terminal() {
            tracing::trace!(
                key_chars = key.chars().count(),
                "niihau_trie create rejected, key exists"
            );
            return false;
        }

        node.value = Some(value);
        self.size += 1;

        tracing::trace!(key_chars = key.chars().count(), size = self.size, "niihau_trie create");
        true
    }

    /// Replaces the value of an existing key in place.
    ///
    /// The walk never creates nodes. A missing path and a path that ends on
    /// a non-terminal node are both reported as `false`.
    ///
    /// # Returns
    ///
    /// * `true` - If the key was stored and its value replaced.
    /// * `false` - If the key was not stored; the trie is unchanged.
    pub fn update<K>(&mut self, key: K, new_value: V) -> bool
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let updated = match self.lookup_mut(key) {
            Some(slot) => {
                *slot = new_value;
                true
            }
            None => false,
        };

        tracing::trace!(key_chars = key.chars().count(), updated, "niihau_trie update");
        updated
    }

    /// Removes a key and prunes any nodes left without purpose.
    ///
    /// After the terminal marker is cleared, every node on the key's path
    /// that is now neither terminal nor a parent is detached, deepest first.
    /// Pruning stops at the first node that is still needed.
    ///
    /// The walk is iterative, so arbitrarily long keys are safe.
    ///
    /// # Returns
    ///
    /// * `Some(V)` - The removed value.
    /// * `None` - If `key` was not stored; the trie is unchanged.
    pub fn delete<K>(&mut self, key: K) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let (removed, pruned) = match Self::delete_and_prune(&mut self.root, key) {
            Some((value, pruned)) => (Some(value), pruned),
            None => (None, 0),
        };

        if removed.is_some() {
            self.size -= 1;
        }

        tracing::trace!(
            key_chars = key.chars().count(),
            removed = removed.is_some(),
            size = self.size,
            "niihau_trie delete"
        );
        if pruned > 0 {
            tracing::debug!(pruned, "niihau_trie pruned dead prefix nodes");
        }

        removed
    }

    /// Removes every key and releases every node except a fresh root.
    ///
    /// The old tree is released through the node worklist, whatever its depth.
    pub fn clear(&mut self) {
        self.root = TrieNode::with_capacity(self.config.child_capacity);
        self.size = 0;
        tracing::trace!("niihau_trie cleared");
    }

    /// Walks the path for `key`, creating missing nodes, and returns the
    /// final node.
    fn descend_or_create<'a>(
        root: &'a mut TrieNode<V>,
        key: &str,
        child_capacity: usize,
    ) -> &'a mut TrieNode<V> {
        let mut node = root;
        for c in key.chars() {
            node = node
                .children
                .entry(c)
                .or_insert_with(|| TrieNode::with_capacity(child_capacity));
        }
        node
    }

    /// Read-only walk; `None` as soon as an edge is missing.
    fn find_node(&self, key: &str) -> Option<&TrieNode<V>> {
        let mut node = &self.root;
        for c in key.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    fn find_node_mut(&mut self, key: &str) -> Option<&mut TrieNode<V>> {
        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.get_mut(&c)?;
        }
        Some(node)
    }

    /// Clears the value stored for `key` and detaches the dead tail of its
    /// path. Returns the value and the number of nodes released.
    ///
    /// The first pass records the deepest ancestor that must survive: the
    /// root, a terminal node, or a node with more than one child. Every node
    /// below that anchor on the path exists only for `key`, so once the
    /// target has no children the whole tail is cut with a single `remove`
    /// on the anchor. Nothing is pruned when nothing was removed.
    fn delete_and_prune(root: &mut TrieNode<V>, key: &str) -> Option<(V, usize)> {
        let mut anchor = 0;
        let mut depth = 0;
        let mut node = &mut *root;

        for c in key.chars() {
            if node.is_terminal() || node.children.len() > 1 {
                anchor = depth;
            }
            node = node.children.get_mut(&c)?;
            depth += 1;
        }

        let removed = node.value.take()?;
        if depth == 0 || !node.children.is_empty() {
            return Some((removed, 0));
        }

        let mut chars = key.chars();
        let mut anchor_node = root;
        for c in chars.by_ref().take(anchor) {
            match anchor_node.children.get_mut(&c) {
                Some(next) => anchor_node = next,
                None => return Some((removed, 0)),
            }
        }
        if let Some(edge) = chars.next() {
            anchor_node.children.remove(&edge);
        }

        Some((removed, depth - anchor))
    }
}

impl<V> Default for NiihauTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for NiihauTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NiihauTrie")
            .field("size", &self.size)
            .field("nodes", &self.node_count())
            .field("config", &self.config)
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for NiihauTrie<V>
where
    K: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for NiihauTrie<V>
where
    K: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}
