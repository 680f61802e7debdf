//! Dictionary configuration.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Characters accepted in headwords: Latin and Bulgarian Cyrillic capitals,
/// space, apostrophe and hyphen.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ '-АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЬЮЯ";

/// Marks a key line; the headword follows it.
pub const DEFAULT_SEPARATOR: char = '@';

/// Number of completions offered for a prefix.
pub const DEFAULT_COMPLETION_LIMIT: usize = 20;

/// File name looked up next to the executable.
pub const DEFAULT_FILE_NAME: &str = "dic.txt";

/// How definitions are read back from the dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverKind {
    /// Open the file and seek for every lookup.
    #[default]
    File,
    /// Map the file once and slice it.
    Mmap,
}

/// Configuration for a [`Dictionary`](crate::Dictionary).
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the dictionary file.
    pub dictionary_path: PathBuf,
    /// Characters keys may contain, in enumeration order.
    pub alphabet: String,
    /// Separator between a definition and the next headword.
    pub separator: char,
    /// Maximum number of completions returned for a prefix.
    pub completion_limit: usize,
    /// Definition reader.
    pub resolver: ResolverKind,
}

impl Config {
    /// Default configuration reading from `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            dictionary_path: path.into(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            separator: DEFAULT_SEPARATOR,
            completion_limit: DEFAULT_COMPLETION_LIMIT,
            resolver: ResolverKind::default(),
        }
    }

    /// `dic.txt` in the directory holding the running executable.
    pub fn default_dictionary_path() -> Result<PathBuf> {
        let exe = std::env::current_exe().map_err(Error::ExecutablePath)?;
        let dir = exe.parent().ok_or_else(|| {
            Error::ExecutablePath(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })?;
        Ok(dir.join(DEFAULT_FILE_NAME))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_path(DEFAULT_FILE_NAME)
    }
}
