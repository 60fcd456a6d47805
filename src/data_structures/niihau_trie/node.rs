// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Niihau Trie.
//!
//! Each `TrieNode` owns its children outright. There are no shared or back
//! references, so dropping a node drops the whole subtree below it.
//!
//! A key of `n` characters produces a chain `n` nodes deep, so nothing here
//! recurses over the tree: counting, cloning and dropping all keep their
//! pending nodes on a heap-allocated worklist.

use fnv::FnvBuildHasher;
use hashbrown::hash_map::Iter as ChildIter;
use hashbrown::HashMap;

/// Child map keyed by a single character.
pub(crate) type ChildMap<V> = HashMap<char, TrieNode<V>, FnvBuildHasher>;

/// A node in the Niihau Trie.
///
/// A node is terminal iff `value` is `Some`. The path from the root to a
/// terminal node spells a stored key.
pub(crate) struct TrieNode<V> {
    /// Map of characters to child nodes
    pub children: ChildMap<V>,

    /// Value stored at this node, present only for terminal nodes
    pub value: Option<V>,
}

impl<V> TrieNode<V> {
    /// Creates a new non-terminal node with room for `capacity` children.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            children: HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default()),
            value: None,
        }
    }

    /// Returns `true` if the path to this node spells a stored key.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// A node that is neither terminal nor has children holds nothing and
    /// must not stay attached to its parent.
    #[inline]
    pub fn is_prunable(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Counts this node and every node below it.
    pub fn subtree_nodes(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.values());
        }

        count
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<V> Drop for TrieNode<V> {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }

        // Detach every descendant before it is dropped, so each node reaches
        // its own `drop` with an empty child map.
        let mut pending: Vec<TrieNode<V>> =
            self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// A node being copied, with the children of its source still to visit.
struct CloneFrame<'a, V> {
    edge: char,
    remaining: ChildIter<'a, char, TrieNode<V>>,
    copy: TrieNode<V>,
}

impl<'a, V: Clone> CloneFrame<'a, V> {
    fn new(edge: char, source: &'a TrieNode<V>) -> Self {
        Self {
            edge,
            remaining: source.children.iter(),
            copy: TrieNode {
                children: HashMap::with_capacity_and_hasher(
                    source.children.len(),
                    FnvBuildHasher::default(),
                ),
                value: source.value.clone(),
            },
        }
    }
}

impl<V: Clone> Clone for TrieNode<V> {
    /// Depth-first copy. A finished child is attached to the frame below it
    /// on the worklist, and the root's frame is the last one to finish.
    fn clone(&self) -> Self {
        let mut ancestors: Vec<CloneFrame<'_, V>> = Vec::new();
        let mut current = CloneFrame::new('\0', self);

        loop {
            if let Some((&edge, child)) = current.remaining.next() {
                let parent = std::mem::replace(&mut current, CloneFrame::new(edge, child));
                ancestors.push(parent);
                continue;
            }

            match ancestors.pop() {
                Some(mut parent) => {
                    parent.copy.children.insert(current.edge, current.copy);
                    current = parent;
                }
                None => return current.copy,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_prunable() {
        let node: TrieNode<u32> = TrieNode::default();
        assert!(!node.is_terminal());
        assert!(node.is_prunable());
        assert_eq!(node.subtree_nodes(), 1);
    }

    #[test]
    fn test_terminal_node_is_not_prunable() {
        let mut node: TrieNode<u32> = TrieNode::with_capacity(4);
        node.value = Some(7);
        assert!(node.is_terminal());
        assert!(!node.is_prunable());
    }

    #[test]
    fn test_internal_node_with_children_is_not_prunable() {
        let mut node: TrieNode<u32> = TrieNode::default();
        let mut child = TrieNode::default();
        child.value = Some(1);
        node.children.insert('a', child);

        assert!(!node.is_terminal());
        assert!(!node.is_prunable());
        assert_eq!(node.subtree_nodes(), 2);
    }

    /// Builds a chain of `depth` nodes below a fresh root, marking the
    /// deepest one terminal.
    fn chain(depth: usize) -> TrieNode<u32> {
        let mut root = TrieNode::default();
        let mut node = &mut root;
        for _ in 0..depth {
            node = node.children.entry('x').or_default();
        }
        node.value = Some(1);
        root
    }

    #[test]
    fn test_deep_chain_count_clone_and_drop() {
        let depth = 150_000;
        let root = chain(depth);
        assert_eq!(root.subtree_nodes(), depth + 1);

        let copy = root.clone();
        drop(root);
        assert_eq!(copy.subtree_nodes(), depth + 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut node: TrieNode<u32> = TrieNode::default();
        let mut left = TrieNode::default();
        left.value = Some(1);
        left.children.insert('z', TrieNode::default());
        node.children.insert('a', left);
        node.children.insert('b', TrieNode::default());
        node.value = Some(0);

        let mut copy = node.clone();
        assert_eq!(copy.subtree_nodes(), 4);
        assert_eq!(copy.value, Some(0));
        assert_eq!(copy.children.get(&'a').and_then(|n| n.value), Some(1));

        copy.children.remove(&'a');
        assert_eq!(copy.subtree_nodes(), 2);
        assert_eq!(node.subtree_nodes(), 4);
    }
}
