//! # Lexicon - dictionary lookup over an alphabet trie
//!
//! Loads a line-oriented dictionary file into an [`alphatrie::SymbolMap`]
//! keyed by headword, storing the byte offset of each definition, and reads
//! definitions back from the file on demand.
//!
//! ## Features
//!
//! - **Exact lookup** with a longest-prefix fallback for unknown words
//! - **Completion**: headwords starting with a prefix, in alphabet order
//! - **Background loading**: the index is built under a write lock while
//!   readers wait for [`Dictionary::is_loaded`]
//! - **Two resolvers**: reopen-and-seek, or a single memory map
//!
//! ## Example
//!
//! ```no_run
//! use lexicon::{Config, Dictionary, Lookup};
//!
//! let dictionary = Dictionary::open(Config::with_path("dic.txt"))?;
//! match dictionary.lookup("shell")? {
//!     Lookup::Definition { text, .. } => println!("{text}"),
//!     Lookup::Suggestion(prefix) => println!("did you mean {prefix}?"),
//!     Lookup::Invalid => println!("Invalid input"),
//! }
//! for word in dictionary.complete("sh")? {
//!     println!("{word}");
//! }
//! # Ok::<(), lexicon::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod loader;
pub mod resolver;

pub use config::{Config, ResolverKind};
pub use dictionary::{Dictionary, Lookup};
pub use error::{Error, Result};
pub use loader::LoadStats;
