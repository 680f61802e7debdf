//! The declared character set keys are drawn from.
//!
//! An [`Alphabet`] is a bijection between an ordered set of distinct
//! characters and the dense index range `0..radix`. The index order is the
//! declaration order, which is also the order in which [`SymbolMap`]
//! enumerates siblings.
//!
//! [`SymbolMap`]: crate::SymbolMap

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when an alphabet cannot be built from its character list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// The same character was declared twice.
    #[error("duplicate character {ch:?} at positions {first} and {second}")]
    DuplicateChar {
        /// The repeated character.
        ch: char,
        /// Index assigned at its first occurrence.
        first: usize,
        /// Position of the repeat.
        second: usize,
    },
}

/// An immutable, ordered, duplicate-free character set.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    indexes: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from `chars`, assigning indices in declaration order.
    ///
    /// Fails if any character appears more than once.
    pub fn new(chars: &str) -> Result<Self, AlphabetError> {
        let mut declared = Vec::with_capacity(chars.len());
        let mut indexes = HashMap::with_capacity(chars.len());

        for (i, c) in chars.chars().enumerate() {
            if let Some(&first) = indexes.get(&c) {
                return Err(AlphabetError::DuplicateChar {
                    ch: c,
                    first,
                    second: i,
                });
            }
            indexes.insert(c, i);
            declared.push(c);
        }

        Ok(Self {
            chars: declared,
            indexes,
        })
    }

    /// Number of declared characters; the fan-out of every trie node.
    #[inline]
    pub fn radix(&self) -> usize {
        self.chars.len()
    }

    /// Whether `c` is declared.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.indexes.contains_key(&c)
    }

    /// Index of `c`, or `None` if `c` is not declared.
    #[inline]
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.indexes.get(&c).copied()
    }

    /// Index of `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is not part of the alphabet.
    #[inline]
    pub fn to_index(&self, c: char) -> usize {
        match self.indexes.get(&c) {
            Some(&i) => i,
            None => panic!("character {c:?} is not in the alphabet"),
        }
    }

    /// Character at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.radix()`.
    #[inline]
    pub fn to_char(&self, i: usize) -> char {
        match self.chars.get(i) {
            Some(&c) => c,
            None => panic!(
                "index {i} out of range for alphabet of radix {}",
                self.radix()
            ),
        }
    }

    /// Whether every character of `s` is declared. The empty string is valid.
    pub fn is_valid(&self, s: &str) -> bool {
        s.chars().all(|c| self.contains(c))
    }

    /// Declared characters in index order.
    pub fn chars(&self) -> impl ExactSizeIterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("radix", &self.radix())
            .field("chars", &self.to_string())
            .finish()
    }
}
