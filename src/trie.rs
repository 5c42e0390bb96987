//! The main trie implementation.
//!
//! This module contains the `PrefixTrie` type, which provides the primary API
//! for working with the set, and the ordered iterator over its strings.

use std::fmt;

use crate::alphabet::{encode, symbol_char};
use crate::node::TrieNode;
use crate::prefix_view::PrefixView;
use crate::Error;

/// A mutable ordered set of letter strings.
///
/// Every node counts the stored strings in its subtree, so the set size,
/// prefix counts and rank queries never scan more than one root-to-node path
/// (plus the siblings along it).
///
/// Strings may only contain `a..=z` and `A..=Z`; every method taking a string
/// rejects anything else with [`Error::InvalidArgument`] before touching the
/// trie.
pub struct PrefixTrie {
    /// The root node of the trie, standing for the empty string
    pub(crate) root: TrieNode,
}

impl PrefixTrie {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        PrefixTrie {
            root: TrieNode::new(),
        }
    }

    /// Builds a trie from a sequence of words.
    ///
    /// Duplicates are ignored. Fails on the first invalid word.
    pub fn from_words<I, S>(words: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = PrefixTrie::new();
        for word in words {
            trie.add(word.as_ref())?;
        }
        Ok(trie)
    }

    /// Returns the number of strings stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let mut trie = PrefixTrie::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.add("hello").unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.root.size
    }

    /// Returns `true` if the trie contains no strings.
    pub fn is_empty(&self) -> bool {
        self.root.size == 0
    }

    /// Removes every string.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
    }

    /// Adds a string, returning whether it was newly inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let mut trie = PrefixTrie::new();
    /// assert_eq!(trie.add("abaa"), Ok(true));
    /// assert_eq!(trie.add("abaa"), Ok(false));
    /// assert_eq!(trie.add(""), Ok(true));
    /// ```
    pub fn add(&mut self, word: &str) -> Result<bool, Error> {
        let symbols = encode(word)?;
        if self.contains_symbols(&symbols) {
            return Ok(false);
        }

        let mut node = &mut self.root;
        node.size += 1;
        for &symbol in &symbols {
            node = node.child_or_insert(symbol);
            node.size += 1;
        }
        node.terminal = true;
        Ok(true)
    }

    /// Returns `true` if the string is stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let mut trie = PrefixTrie::new();
    /// trie.add("Hse").unwrap();
    ///
    /// assert_eq!(trie.contains("Hse"), Ok(true));
    /// assert_eq!(trie.contains("hse"), Ok(false));
    /// assert_eq!(trie.contains("H"), Ok(false));
    /// ```
    pub fn contains(&self, word: &str) -> Result<bool, Error> {
        let symbols = encode(word)?;
        Ok(self.contains_symbols(&symbols))
    }

    /// Removes a string, returning whether it was present.
    ///
    /// Any subtree left without stored strings is released on the way down.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let mut trie = PrefixTrie::new();
    /// trie.add("JavaIsAwesome").unwrap();
    ///
    /// assert_eq!(trie.remove("JavaIsAwesome"), Ok(true));
    /// assert_eq!(trie.remove("JavaIsAwesome"), Ok(false));
    /// assert!(trie.is_empty());
    /// ```
    pub fn remove(&mut self, word: &str) -> Result<bool, Error> {
        let symbols = encode(word)?;
        if !self.contains_symbols(&symbols) {
            return Ok(false);
        }

        let mut node = &mut self.root;
        node.size -= 1;
        for &symbol in &symbols {
            let slot = &mut node.children[usize::from(symbol)];
            // The word is the only string left below this child
            if slot.as_ref().map_or(true, |child| child.size <= 1) {
                *slot = None;
                return Ok(true);
            }
            match slot.as_deref_mut() {
                Some(child) => {
                    child.size -= 1;
                    node = child;
                }
                None => return Ok(true),
            }
        }
        node.terminal = false;
        Ok(true)
    }

    /// Counts the stored strings that start with `prefix`.
    ///
    /// The empty prefix counts everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::from_words(&["a", "aa", "aaa", "abba", "SaintP"]).unwrap();
    ///
    /// assert_eq!(trie.count_with_prefix("a"), Ok(4));
    /// assert_eq!(trie.count_with_prefix("aa"), Ok(2));
    /// assert_eq!(trie.count_with_prefix(""), Ok(5));
    /// assert_eq!(trie.count_with_prefix("A"), Ok(0));
    /// ```
    pub fn count_with_prefix(&self, prefix: &str) -> Result<usize, Error> {
        let symbols = encode(prefix)?;
        Ok(self.find(&symbols).map_or(0, |node| node.size))
    }

    /// Returns the 1-based position `word` has in the sorted set, or would
    /// have if it were added.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::from_words(&["ab", "c"]).unwrap();
    ///
    /// assert_eq!(trie.rank("ab"), Ok(1));
    /// assert_eq!(trie.rank("b"), Ok(2));
    /// assert_eq!(trie.rank("c"), Ok(2));
    /// assert_eq!(trie.rank("d"), Ok(3));
    /// ```
    pub fn rank(&self, word: &str) -> Result<usize, Error> {
        let symbols = encode(word)?;
        Ok(self.rank_symbols(&symbols))
    }

    /// Returns the string at a 1-based position in the sorted set.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::from_words(&["b", "a", "B"]).unwrap();
    ///
    /// assert_eq!(trie.nth(1), Some("a".to_string()));
    /// assert_eq!(trie.nth(3), Some("B".to_string()));
    /// assert_eq!(trie.nth(0), None);
    /// assert_eq!(trie.nth(4), None);
    /// ```
    pub fn nth(&self, position: usize) -> Option<String> {
        if position == 0 || position > self.root.size {
            return None;
        }

        let mut word = String::new();
        let mut seen = 0;
        let mut node = &self.root;
        'descend: loop {
            if node.terminal {
                seen += 1;
                if seen == position {
                    return Some(word);
                }
            }
            for (symbol, child) in node.children() {
                if seen + child.size >= position {
                    word.push(symbol_char(symbol));
                    node = child;
                    continue 'descend;
                }
                seen += child.size;
            }
            // Unreachable while the counters are consistent
            return None;
        }
    }

    /// Returns the smallest stored string.
    pub fn first(&self) -> Option<String> {
        self.nth(1)
    }

    /// Returns the largest stored string.
    pub fn last(&self) -> Option<String> {
        self.nth(self.len())
    }

    /// Returns the stored string `k` positions after `word`, or before it for
    /// negative `k`.
    ///
    /// Positions are counted as if `word` were stored. The trie is never
    /// modified: when `word` is absent its would-be position is computed and
    /// the offset is applied against the stored strings around it. With
    /// `k == 0` an absent `word` comes back as itself when its whole path is
    /// already in the trie, and as `None` when the path stops short. Any
    /// position outside the set gives `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::from_words(&["", "ab", "abaa", "abb", "c", "ca", "cb", "ccc"]).unwrap();
    ///
    /// assert_eq!(trie.next_string("", 4), Ok(Some("c".to_string())));
    /// assert_eq!(trie.next_string("ca", 1), Ok(Some("cb".to_string())));
    /// assert_eq!(trie.next_string("ccc", 1), Ok(None));
    ///
    /// // "abaaa" is not stored, but would sit right after "abaa"
    /// assert_eq!(trie.next_string("abaaa", 3), Ok(Some("ca".to_string())));
    /// assert_eq!(trie.next_string("abaaa", -1), Ok(Some("abaa".to_string())));
    /// assert_eq!(trie.next_string("abaaa", 0), Ok(None));
    ///
    /// // "aba" is not stored either, but its node is on the path to "abaa"
    /// assert_eq!(trie.next_string("aba", 0), Ok(Some("aba".to_string())));
    /// ```
    pub fn next_string(&self, word: &str, k: isize) -> Result<Option<String>, Error> {
        let symbols = encode(word)?;
        let rank = self.rank_symbols(&symbols);
        let stored = self.contains_symbols(&symbols);

        // An absent word only occupies its position virtually, so every
        // stored string after it sits one position lower than counted.
        let shift = match k {
            0 if !stored => return Ok(self.find(&symbols).map(|_| word.to_string())),
            k if k > 0 && !stored => k - 1,
            k => k,
        };

        Ok(rank.checked_add_signed(shift).and_then(|target| self.nth(target)))
    }

    /// Returns an iterator over the stored strings in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::from_words(&["b", "A", "", "ab"]).unwrap();
    /// let words: Vec<String> = trie.iter().collect();
    ///
    /// assert_eq!(words, vec!["", "ab", "b", "A"]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(Some(&self.root), String::new())
    }

    /// Creates a view of the strings starting with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_trie::PrefixTrie;
    ///
    /// let trie = PrefixTrie::from_words(&["hello", "help", "world"]).unwrap();
    /// let view = trie.view_subtrie("hel").unwrap();
    ///
    /// assert_eq!(view.len(), 2);
    /// assert_eq!(view.contains("hello"), Ok(true));
    /// assert_eq!(view.contains("world"), Ok(false));
    /// ```
    pub fn view_subtrie(&self, prefix: &str) -> Result<PrefixView<'_>, Error> {
        PrefixView::new(self, prefix)
    }

    /// Walks the path spelled by `symbols`, if it exists.
    pub(crate) fn find(&self, symbols: &[u8]) -> Option<&TrieNode> {
        symbols
            .iter()
            .try_fold(&self.root, |node, &symbol| node.child(symbol))
    }

    pub(crate) fn contains_symbols(&self, symbols: &[u8]) -> bool {
        self.find(symbols).map_or(false, |node| node.terminal)
    }

    fn rank_symbols(&self, symbols: &[u8]) -> usize {
        let mut order = 1;
        let mut node = &self.root;
        for &symbol in symbols {
            // Lower siblings and the string ending here both sort first
            order += node.size_before(symbol) + usize::from(node.terminal);
            match node.child(symbol) {
                Some(child) => node = child,
                None => return order,
            }
        }
        order
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrefixTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for PrefixTrie {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for PrefixTrie {}

impl<'a> IntoIterator for &'a PrefixTrie {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Frame<'a> {
    node: &'a TrieNode,
    /// Next child slot to visit
    next: usize,
    /// Whether the node's own string has been considered
    entered: bool,
}

/// An iterator over stored strings in sorted order.
///
/// This iterator performs a depth-first traversal with an explicit stack, so
/// arbitrarily long strings are safe to iterate.
pub struct Iter<'a> {
    stack: Vec<Frame<'a>>,

    /// The string spelled by the path to the top of the stack
    word: String,

    remaining: usize,
}

impl<'a> Iter<'a> {
    /// Starts below `start`, whose path spells `prefix`.
    pub(crate) fn new(start: Option<&'a TrieNode>, prefix: String) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            word: prefix,
            remaining: 0,
        };

        if let Some(node) = start {
            iter.remaining = node.size;
            iter.stack.push(Frame {
                node,
                next: 0,
                entered: false,
            });
        }

        iter
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.last_mut() {
            if !frame.entered {
                frame.entered = true;
                if frame.node.terminal {
                    self.remaining -= 1;
                    return Some(self.word.clone());
                }
                continue;
            }

            let node: &'a TrieNode = frame.node;
            match node.next_child_from(frame.next) {
                Some((symbol, child)) => {
                    frame.next = usize::from(symbol) + 1;
                    self.word.push(symbol_char(symbol));
                    self.stack.push(Frame {
                        node: child,
                        next: 0,
                        entered: false,
                    });
                }
                None => {
                    self.stack.pop();
                    // The starting node contributed no symbol of its own
                    if !self.stack.is_empty() {
                        self.word.pop();
                    }
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, QuickCheck};

    impl PrefixTrie {
        /// Panics if any reachable node breaks the counter or pruning rules.
        pub(crate) fn validate_invariants(&self) {
            let mut pending = vec![&self.root];
            while let Some(node) = pending.pop() {
                assert!(node.is_consistent(), "Inconsistent counter: {:?}", node);
                for (symbol, child) in node.children() {
                    assert!(child.size >= 1, "Empty child {:?} left attached", symbol_char(symbol));
                    pending.push(child);
                }
            }
        }
    }

    fn sample() -> PrefixTrie {
        PrefixTrie::from_words(&["", "ab", "abaa", "abb", "c", "ca", "cb", "ccc"]).unwrap()
    }

    #[test]
    fn test_new_trie() {
        let trie = PrefixTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.count_with_prefix(""), Ok(0));
        assert_eq!(trie.first(), None);
        assert_eq!(trie.last(), None);
        trie.validate_invariants();
    }

    #[test]
    fn test_add_counts_path() {
        let mut trie = PrefixTrie::new();
        assert_eq!(trie.add("ab"), Ok(true));
        assert_eq!(trie.add("abc"), Ok(true));
        assert_eq!(trie.add("ab"), Ok(false));

        assert_eq!(trie.root.size, 2);
        let a = trie.root.child(0).unwrap();
        assert_eq!(a.size, 2);
        assert!(!a.terminal);
        let ab = a.child(1).unwrap();
        assert_eq!(ab.size, 2);
        assert!(ab.terminal);
        trie.validate_invariants();
    }

    #[test]
    fn test_add_rejects_before_mutation() {
        let mut trie = PrefixTrie::new();
        trie.add("ab").unwrap();

        assert_eq!(
            trie.add("abc@"),
            Err(Error::InvalidArgument {
                character: '@',
                position: 3
            })
        );
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.count_with_prefix("abc"), Ok(0));
        trie.validate_invariants();
    }

    #[test]
    fn test_remove_prunes_empty_subtree() {
        let mut trie = PrefixTrie::from_words(&["a", "abcd"]).unwrap();

        assert_eq!(trie.remove("abcd"), Ok(true));
        let a = trie.root.child(0).unwrap();
        assert!(a.child(1).is_none());
        assert_eq!(a.size, 1);
        trie.validate_invariants();

        assert_eq!(trie.remove("a"), Ok(true));
        assert!(trie.root.child(0).is_none());
        assert_eq!(trie.root.size, 0);
        trie.validate_invariants();
    }

    #[test]
    fn test_remove_keeps_shared_path() {
        let mut trie = PrefixTrie::from_words(&["ab", "abc", "abd"]).unwrap();

        assert_eq!(trie.remove("ab"), Ok(true));
        let ab = trie.root.child(0).and_then(|a| a.child(1)).unwrap();
        assert!(!ab.terminal);
        assert_eq!(ab.size, 2);
        assert_eq!(trie.contains("abc"), Ok(true));
        assert_eq!(trie.contains("abd"), Ok(true));
        trie.validate_invariants();
    }

    #[test]
    fn test_remove_descends_before_pruning() {
        let mut trie = PrefixTrie::from_words(&["a", "ab", "abc", "abcde", "abcdf"]).unwrap();

        // Counters drop along "abcd", then the "e" branch goes
        assert_eq!(trie.remove("abcde"), Ok(true));
        let abcd = ["b", "c", "d"]
            .iter()
            .try_fold(trie.root.child(0).unwrap(), |node, s| node.child(s.as_bytes()[0] - b'a'))
            .unwrap();
        assert_eq!(abcd.size, 1);
        assert!(abcd.child(4).is_none());
        assert_eq!(trie.count_with_prefix("a"), Ok(4));
        trie.validate_invariants();

        // Pruned below "abc", which stays as a stored string
        assert_eq!(trie.remove("abcdf"), Ok(true));
        assert_eq!(trie.count_with_prefix("abc"), Ok(1));
        assert_eq!(trie.count_with_prefix("abcd"), Ok(0));
        trie.validate_invariants();

        assert_eq!(trie.remove("abc"), Ok(true));
        assert_eq!(trie.remove("ab"), Ok(true));
        assert_eq!(trie.remove("a"), Ok(true));
        assert!(trie.is_empty());
        assert!(trie.root.child(0).is_none());
        trie.validate_invariants();
    }

    #[test]
    fn test_remove_absent() {
        let mut trie = PrefixTrie::from_words(&["abc"]).unwrap();

        assert_eq!(trie.remove("ab"), Ok(false));
        assert_eq!(trie.remove("abcd"), Ok(false));
        assert_eq!(trie.remove("x"), Ok(false));
        assert_eq!(trie.len(), 1);
        trie.validate_invariants();
    }

    #[test]
    fn test_remove_validates() {
        let mut trie = PrefixTrie::from_words(&["abc"]).unwrap();
        assert!(trie.remove("ab c").is_err());
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_empty_string_at_root() {
        let mut trie = PrefixTrie::new();
        assert_eq!(trie.contains(""), Ok(false));
        assert_eq!(trie.add(""), Ok(true));
        assert!(trie.root.terminal);
        assert_eq!(trie.contains(""), Ok(true));
        assert_eq!(trie.remove(""), Ok(true));
        assert!(!trie.root.terminal);
        assert_eq!(trie.remove(""), Ok(false));
        trie.validate_invariants();
    }

    #[test]
    fn test_rank() {
        let trie = sample();

        let expected = ["", "ab", "abaa", "abb", "c", "ca", "cb", "ccc"];
        for (position, word) in expected.iter().enumerate() {
            assert_eq!(trie.rank(word), Ok(position + 1), "rank({:?})", word);
        }

        // Absent words take the position of the next stored string
        assert_eq!(trie.rank("a"), Ok(2));
        assert_eq!(trie.rank("abaaa"), Ok(4));
        assert_eq!(trie.rank("b"), Ok(5));
        assert_eq!(trie.rank("cccc"), Ok(9));
        assert_eq!(trie.rank("A"), Ok(9));
    }

    #[test]
    fn test_nth() {
        let trie = sample();
        let words: Vec<String> = (1..=trie.len()).filter_map(|i| trie.nth(i)).collect();
        assert_eq!(words, trie.iter().collect::<Vec<_>>());
        assert_eq!(trie.nth(0), None);
        assert_eq!(trie.nth(9), None);
        assert_eq!(trie.first(), Some(String::new()));
        assert_eq!(trie.last(), Some("ccc".to_string()));
    }

    #[test]
    fn test_next_string_negative() {
        let trie = sample();

        assert_eq!(trie.next_string("ccc", -7), Ok(Some(String::new())));
        assert_eq!(trie.next_string("ccc", -8), Ok(None));
        assert_eq!(trie.next_string("c", -2), Ok(Some("abaa".to_string())));
        assert_eq!(trie.next_string("", isize::MIN), Ok(None));
        assert_eq!(trie.next_string("", isize::MAX), Ok(None));

        // "b" is absent and would sit between "abb" and "c"
        assert_eq!(trie.next_string("b", -1), Ok(Some("abb".to_string())));
        assert_eq!(trie.next_string("b", 1), Ok(Some("c".to_string())));
    }

    #[test]
    fn test_next_string_leaves_trie_untouched() {
        let trie = sample();
        let before: Vec<String> = trie.iter().collect();

        trie.next_string("abaaa", 2).unwrap();
        trie.next_string("zz", -3).unwrap();
        assert_eq!(trie.next_string("aba", 0), Ok(Some("aba".to_string())));

        assert_eq!(trie.iter().collect::<Vec<_>>(), before);
        assert_eq!(trie.contains("abaaa"), Ok(false));
        assert_eq!(trie.contains("aba"), Ok(false));
        trie.validate_invariants();
    }

    #[test]
    fn test_iter_order_and_len() {
        let trie = PrefixTrie::from_words(&["Z", "a", "zz", "A", "aZ", "ab"]).unwrap();
        let iter = trie.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(
            iter.collect::<Vec<_>>(),
            vec!["a", "ab", "aZ", "zz", "A", "Z"]
        );
    }

    #[test]
    fn test_clear() {
        let mut trie = sample();
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.contains("ab"), Ok(false));
        trie.validate_invariants();
    }

    #[test]
    fn test_equality_and_debug() {
        let a = PrefixTrie::from_words(&["b", "a"]).unwrap();
        let mut b = PrefixTrie::from_words(&["a", "b", "c"]).unwrap();
        assert_ne!(a, b);
        b.remove("c").unwrap();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), r#"{"a", "b"}"#);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(String),
        Remove(String),
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 5;
            let word: String = (0..len)
                .map(|_| char::from(*g.choose(b"abAB").unwrap()))
                .collect();
            if bool::arbitrary(g) {
                Op::Add(word)
            } else {
                Op::Remove(word)
            }
        }
    }

    #[test]
    fn prop_counters_hold_after_every_op() {
        fn prop(ops: Vec<Op>) -> bool {
            let mut trie = PrefixTrie::new();
            for op in &ops {
                match op {
                    Op::Add(word) => trie.add(word).unwrap(),
                    Op::Remove(word) => trie.remove(word).unwrap(),
                };
                trie.validate_invariants();
            }
            trie.root.size == trie.iter().count()
        }
        QuickCheck::new().tests(500).quickcheck(prop as fn(Vec<Op>) -> bool);
    }
}
