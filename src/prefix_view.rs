//! Prefix view into a prefix trie.
//!
//! This module provides the `PrefixView` type, which gives counted, ordered
//! access to the stored strings sharing a prefix.

use std::fmt;

use crate::alphabet::encode;
use crate::node::TrieNode;
use crate::trie::{Iter, PrefixTrie};
use crate::Error;

/// A lightweight view into the subtrie below a prefix.
///
/// The view borrows the trie, so it always reflects the trie as it was when
/// the view was created. Its length comes straight from the subtree counter.
///
/// # Examples
///
/// ```
/// use prefix_trie::PrefixTrie;
///
/// let trie1 = PrefixTrie::from_words(&["hello", "help"]).unwrap();
/// let trie2 = PrefixTrie::from_words(&["hello", "help", "world"]).unwrap();
///
/// let view1 = trie1.view_subtrie("hel").unwrap();
/// let view2 = trie2.view_subtrie("hel").unwrap();
///
/// // Views with identical content are equal
/// assert_eq!(view1, view2);
///
/// assert_eq!(view1.contains("hello"), Ok(true));
/// assert_eq!(view1.contains("world"), Ok(false));
/// ```
#[derive(Clone)]
pub struct PrefixView<'a> {
    /// The source trie for this view
    trie: &'a PrefixTrie,

    /// The prefix defining this view
    prefix: String,

    /// The subtrie node at the prefix, if it exists
    subtrie_node: Option<&'a TrieNode>,
}

impl<'a> PrefixView<'a> {
    /// Creates a new prefix view for the given trie and prefix.
    pub fn new(trie: &'a PrefixTrie, prefix: &str) -> Result<Self, Error> {
        let symbols = encode(prefix)?;

        Ok(PrefixView {
            trie,
            prefix: prefix.to_string(),
            subtrie_node: trie.find(&symbols),
        })
    }

    /// Returns the prefix for this view.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the underlying trie.
    pub fn trie(&self) -> &'a PrefixTrie {
        self.trie
    }

    /// Returns whether any stored string passes through the prefix.
    pub fn exists(&self) -> bool {
        self.subtrie_node.is_some()
    }

    /// Returns the number of strings in this view.
    pub fn len(&self) -> usize {
        self.subtrie_node.map_or(0, |node| node.size)
    }

    /// Returns whether this view is empty (contains no strings).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the view contains a string.
    ///
    /// Only returns true if the string is stored and starts with the prefix.
    pub fn contains(&self, word: &str) -> Result<bool, Error> {
        let symbols = encode(word)?;
        if !word.starts_with(self.prefix.as_str()) {
            return Ok(false);
        }

        // The view's node already matched the prefix; walk only the rest
        let found = self.subtrie_node.and_then(|start| {
            symbols[self.prefix.len()..]
                .iter()
                .try_fold(start, |node, &symbol| node.child(symbol))
        });
        Ok(found.map_or(false, |node| node.terminal))
    }

    /// Returns an iterator over the strings in the view, in sorted order.
    ///
    /// Every yielded string includes the prefix.
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.subtrie_node, self.prefix.clone())
    }

    /// Returns the smallest string in the view.
    pub fn first(&self) -> Option<String> {
        self.iter().next()
    }

    /// Returns the largest string in the view.
    pub fn last(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        // The view's strings form a contiguous run in the whole trie
        let first = self.trie.rank(&self.prefix).ok()?;
        self.trie.nth(first + self.len() - 1)
    }

    fn suffixes(&self) -> impl Iterator<Item = String> + 'a {
        let depth = self.prefix.len();
        self.iter().map(move |word| word[depth..].to_string())
    }
}

impl fmt::Debug for PrefixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &self.prefix)
            .field("len", &self.len())
            .finish()
    }
}

/// Views are equal when their subtries hold the same strings once the
/// prefixes are stripped, whatever the prefixes or source tries are.
impl PartialEq for PrefixView<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.subtrie_node, other.subtrie_node) {
            (None, None) => true,
            (Some(a), Some(b)) if std::ptr::eq(a, b) => true,
            (Some(a), Some(b)) => a.size == b.size && self.suffixes().eq(other.suffixes()),
            _ => false,
        }
    }
}

impl Eq for PrefixView<'_> {}

impl<'a> IntoIterator for &PrefixView<'a> {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
