use crate::error::CharsetError;
use std::collections::HashSet;

/// Digits, lower and upper case letters, then punctuation
pub const DEFAULT_SYMBOLS: &str = concat!(
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|",
);

/// Ordered alphabet every candidate is built from
///
/// Symbol order defines the enumeration order of the depth-first search and
/// the order in which leading symbols are handed to workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    symbols: Vec<char>,
}

impl Charset {
    /// Build a charset from an explicit alphabet
    pub fn new(alphabet: &str) -> Result<Self, CharsetError> {
        let mut seen = HashSet::new();
        let mut symbols = Vec::with_capacity(alphabet.len());

        for c in alphabet.chars() {
            if !c.is_ascii_graphic() && c != ' ' {
                return Err(CharsetError::NotPrintable(c));
            }
            if !seen.insert(c) {
                return Err(CharsetError::Duplicate(c));
            }
            symbols.push(c);
        }

        if symbols.is_empty() {
            return Err(CharsetError::Empty);
        }

        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Number of candidates of exactly `length` symbols
    pub fn candidates_of_length(&self, length: u32) -> Option<u128> {
        (self.symbols.len() as u128).checked_pow(length)
    }

    /// Total candidates of length 1 through `max_length`
    pub fn search_space(&self, max_length: u32) -> Option<u128> {
        (1..=max_length).try_fold(0u128, |acc, len| {
            acc.checked_add(self.candidates_of_length(len)?)
        })
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.chars().collect(),
        }
    }
}
