//! Mapping between the 52 letters and the symbol indices used by the trie.
//!
//! Symbol `0..26` is `a..=z` and symbol `26..52` is `A..=Z`. The symbol index
//! is both the child slot of a node and the sort key of a letter.

use std::convert::TryFrom;

use once_cell::sync::Lazy;

use crate::Error;

/// Number of distinct symbols, and so the fan-out of every node.
pub const ALPHABET_SIZE: usize = 52;

/// Every letter, listed in symbol order.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Byte-indexed lookup table, `None` for bytes outside the alphabet.
static SYMBOL_TABLE: Lazy<[Option<u8>; 256]> = Lazy::new(|| {
    let mut table = [None; 256];
    for (index, byte) in ALPHABET.bytes().enumerate() {
        table[usize::from(byte)] = Some(index as u8);
    }
    table
});

/// Returns the symbol index of an ASCII byte, if it is a letter.
pub fn symbol_index(byte: u8) -> Option<u8> {
    SYMBOL_TABLE[usize::from(byte)]
}

/// Returns the letter for a symbol index.
///
/// # Panics
///
/// Panics if `index >= ALPHABET_SIZE`.
pub fn symbol_char(index: u8) -> char {
    char::from(ALPHABET.as_bytes()[usize::from(index)])
}

/// Converts a word into symbol indices, rejecting any non-letter.
///
/// The empty word is valid and encodes to an empty sequence.
///
/// # Examples
///
/// ```
/// use prefix_trie::alphabet::encode;
///
/// assert_eq!(encode("aZ"), Ok(vec![0, 51]));
/// assert!(encode("a b").is_err());
/// ```
pub fn encode(word: &str) -> Result<Vec<u8>, Error> {
    word.chars()
        .enumerate()
        .map(|(position, character)| {
            // Multi-byte chars can never be letters here.
            u8::try_from(character)
                .ok()
                .and_then(symbol_index)
                .ok_or(Error::InvalidArgument {
                    character,
                    position,
                })
        })
        .collect()
}

/// Converts symbol indices back into a word.
pub fn decode(symbols: &[u8]) -> String {
    symbols.iter().map(|&symbol| symbol_char(symbol)).collect()
}
