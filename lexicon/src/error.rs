//! Error types for the lexicon crate.

use std::path::PathBuf;

use alphatrie::AlphabetError;
use thiserror::Error;

/// The error type for loading and querying a dictionary.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening, seeking, reading or mapping the dictionary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured alphabet is malformed.
    #[error("invalid alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    /// A line of the dictionary file is not valid UTF-8.
    #[error("dictionary line at byte {offset} is not valid UTF-8")]
    Encoding {
        /// Byte offset of the start of the offending line.
        offset: u64,
    },

    /// A stored definition offset lies beyond the end of the file.
    #[error("definition offset {offset} is past the end of the file ({len} bytes)")]
    OffsetOutOfRange {
        /// The requested offset.
        offset: u64,
        /// Length of the file.
        len: u64,
    },

    /// The directory of the running executable could not be determined.
    #[error("cannot locate the running executable: {0}")]
    ExecutablePath(#[source] std::io::Error),

    /// The dictionary file does not exist.
    #[error("dictionary file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A query arrived before the dictionary finished loading.
    #[error("dictionary is still loading")]
    NotLoaded,
}

/// A convenience `Result` alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
