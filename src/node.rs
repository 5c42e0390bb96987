//! Internal node implementation for the prefix trie.
//!
//! Each `TrieNode` owns its children outright, one slot per symbol, and keeps
//! a counter of the stored strings in its subtree. The counter of a node is
//! always its own terminal flag plus the counters of its children.

use std::fmt;

use crate::alphabet::{symbol_char, ALPHABET_SIZE};

const NO_CHILD: Option<Box<TrieNode>> = None;

/// Internal node type for the prefix trie.
pub(crate) struct TrieNode {
    /// Child nodes indexed by symbol
    pub children: [Option<Box<TrieNode>>; ALPHABET_SIZE],

    /// Whether the path to this node spells a stored string
    pub terminal: bool,

    /// Number of stored strings in this subtree, this node included
    pub size: usize,
}

impl TrieNode {
    /// Creates a new empty node
    pub fn new() -> Self {
        TrieNode {
            children: [NO_CHILD; ALPHABET_SIZE],
            terminal: false,
            size: 0,
        }
    }

    pub fn child(&self, symbol: u8) -> Option<&TrieNode> {
        self.children[usize::from(symbol)].as_deref()
    }

    /// Returns the child for `symbol`, creating an empty one if absent.
    pub fn child_or_insert(&mut self, symbol: u8) -> &mut TrieNode {
        self.children[usize::from(symbol)].get_or_insert_with(|| Box::new(TrieNode::new()))
    }

    /// Iterates over present children in ascending symbol order.
    pub fn children(&self) -> impl Iterator<Item = (u8, &TrieNode)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(symbol, child)| child.as_deref().map(|child| (symbol as u8, child)))
    }

    /// Returns the first present child whose symbol is at least `from`.
    pub fn next_child_from(&self, from: usize) -> Option<(u8, &TrieNode)> {
        self.children
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(symbol, child)| child.as_deref().map(|child| (symbol as u8, child)))
    }

    /// Total size of the children with a symbol strictly below `symbol`.
    pub fn size_before(&self, symbol: u8) -> usize {
        self.children[..usize::from(symbol)]
            .iter()
            .flatten()
            .map(|child| child.size)
            .sum()
    }

    /// Checks the counter of this node against its flag and its children.
    ///
    /// Only this node is inspected; callers walk the tree themselves.
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        let below: usize = self.children().map(|(_, child)| child.size).sum();
        self.size == usize::from(self.terminal) + below
    }

    fn take_children(&mut self) -> impl Iterator<Item = Box<TrieNode>> + '_ {
        self.children.iter_mut().filter_map(Option::take)
    }
}

// Long single-letter chains would overflow the stack with the default
// recursive drop, so subtrees are flattened onto a heap stack first.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TrieNode>> = self.take_children().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_children());
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.children().map(|(symbol, _)| symbol_char(symbol)).collect();
        f.debug_struct("TrieNode")
            .field("terminal", &self.terminal)
            .field("size", &self.size)
            .field("children", &symbols)
            .finish()
    }
}
