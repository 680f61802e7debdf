//! # alphatrie
//!
//! A radix trie symbol table over an explicitly declared alphabet.
//!
//! Keys are strings drawn from an [`Alphabet`]: a fixed, ordered,
//! duplicate-free character set. Every trie node has one child slot per
//! alphabet character, so lookups cost one slot access per key character.
//!
//! Supported queries:
//! - exact lookup ([`SymbolMap::get`])
//! - prefix enumeration in alphabet order ([`SymbolMap::keys_with_prefix`])
//! - longest stored key that prefixes a query ([`SymbolMap::longest_prefix_of`])
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use alphatrie::{Alphabet, SymbolMap};
//!
//! let alphabet = Arc::new(Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap());
//! let mut map: SymbolMap<u64> = SymbolMap::new(Arc::clone(&alphabet));
//! map.put("she", 0);
//! map.put("shells", 1);
//! map.put("shore", 2);
//!
//! assert_eq!(map.get("she"), Some(&0));
//! assert_eq!(map.keys_with_prefix("sh", Some(2)), vec!["she", "shells"]);
//! assert_eq!(map.longest_prefix_of("shellsort"), "shells");
//!
//! // Untrusted input is checked against the alphabet before it reaches the map.
//! assert!(!alphabet.is_valid("Shells"));
//! ```
//!
//! The map has no internal locking. Build it from one thread, then share it
//! read-only (it is `Sync` whenever `V` is).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod alphabet;
mod symbol_map;

pub use alphabet::{Alphabet, AlphabetError};
pub use symbol_map::{PrefixIter, SymbolMap};

#[cfg(test)]
mod proptests;
