//! # Prefix Trie
//!
//! A mutable ordered set of strings over the 52 Latin letters, backed by a
//! character trie whose nodes count the stored strings below them.
//!
//! Besides the usual set operations, the subtree counters give O(depth)
//! answers to "how many stored strings start with this prefix" and to rank
//! queries: the position of a string in the sorted set, and the string found
//! `k` places after (or before) it.
//!
//! ## Ordering
//!
//! Strings are ordered symbol by symbol, where all lowercase letters come
//! before all uppercase letters (`a < z < A < Z`). A string sorts before every
//! one of its extensions.
//!
//! ## Example
//!
//! ```rust
//! use prefix_trie::PrefixTrie;
//!
//! let mut trie = PrefixTrie::new();
//!
//! assert_eq!(trie.add("abb"), Ok(true));
//! assert_eq!(trie.add("aA"), Ok(true));
//! assert_eq!(trie.add("abb"), Ok(false));
//!
//! assert_eq!(trie.count_with_prefix("a"), Ok(2));
//! assert_eq!(trie.next_string("abb", 1), Ok(Some("aA".to_string())));
//! assert!(trie.add("a-b").is_err());
//! ```

pub mod alphabet;
mod node;
mod prefix_view;
mod trie;

// Re-export public types
pub use crate::prefix_view::PrefixView;
pub use crate::trie::{Iter, PrefixTrie};

/// Errors that can occur in trie operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The word contains a character outside `a..=z` and `A..=Z`.
    ///
    /// `position` counts characters, not bytes.
    InvalidArgument { character: char, position: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument { character, position } => write!(
                f,
                "Invalid character {:?} at position {}: only Latin letters are allowed",
                character, position
            ),
        }
    }
}

impl std::error::Error for Error {}
