//! A loaded dictionary: headword index plus definition resolver.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alphatrie::{Alphabet, SymbolMap};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::loader::{self, LoadStats};
use crate::resolver::{self, Resolve};

/// Outcome of looking a word up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The word is a headword.
    Definition {
        /// Normalised headword.
        word: String,
        /// Its definition text.
        text: String,
    },
    /// The word is not a headword; this is the longest headword that
    /// prefixes it, empty if there is none.
    Suggestion(String),
    /// The word contains characters outside the alphabet.
    Invalid,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Definition { text, .. } => f.write_str(text),
            Lookup::Suggestion(prefix) => f.write_str(prefix),
            Lookup::Invalid => f.write_str("Invalid input"),
        }
    }
}

/// A dictionary that is loaded once and then queried, possibly from several
/// threads.
///
/// Loading scans into a private index and swaps it in when complete; queries
/// take read locks and fail with [`Error::NotLoaded`] until a load has
/// completed.
pub struct Dictionary {
    config: Config,
    alphabet: Arc<Alphabet>,
    index: RwLock<SymbolMap<u64>>,
    resolver: RwLock<Option<Box<dyn Resolve>>>,
    loaded: AtomicBool,
}

impl Dictionary {
    /// Create an empty, unloaded dictionary.
    pub fn new(config: Config) -> Result<Self> {
        let alphabet = Arc::new(Alphabet::new(&config.alphabet)?);
        Ok(Self {
            index: RwLock::new(SymbolMap::new(Arc::clone(&alphabet))),
            resolver: RwLock::new(None),
            loaded: AtomicBool::new(false),
            alphabet,
            config,
        })
    }

    /// Create a dictionary and load it immediately.
    pub fn open(config: Config) -> Result<Self> {
        let dictionary = Self::new(config)?;
        dictionary.load()?;
        Ok(dictionary)
    }

    /// Scan the dictionary file and build the headword index.
    ///
    /// Loading again rebuilds the index from scratch. The new index and
    /// resolver replace the current ones only once both are complete, so a
    /// failed reload keeps serving the previous contents.
    pub fn load(&self) -> Result<LoadStats> {
        let path = &self.config.dictionary_path;
        info!(path = %path.display(), "loading dictionary");

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.clone()),
            _ => Error::Io(e),
        })?;

        let mut fresh = SymbolMap::new(Arc::clone(&self.alphabet));
        let stats = loader::load_into(BufReader::new(file), self.config.separator, &mut fresh)?;

        debug!(kind = ?self.config.resolver, "opening definition resolver");
        let resolver = resolver::open(self.config.resolver, path, self.config.separator)?;

        // Index before resolver, the order lookups take them in.
        let mut index = self.index.write();
        let mut current = self.resolver.write();
        *index = fresh;
        *current = Some(resolver);
        self.loaded.store(true, Ordering::Release);
        drop(current);
        drop(index);

        info!(
            keys = stats.keys,
            skipped = stats.skipped,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "dictionary loaded"
        );
        Ok(stats)
    }

    /// Whether a load has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Number of headwords.
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Whether the dictionary holds no headwords.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The alphabet headwords are drawn from.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The configuration this dictionary was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look `input` up, case-insensitively.
    ///
    /// Returns the definition if `input` is a headword, otherwise the longest
    /// headword that prefixes it.
    pub fn lookup(&self, input: &str) -> Result<Lookup> {
        self.ensure_loaded()?;

        let word = input.to_uppercase();
        if !self.alphabet.is_valid(&word) {
            return Ok(Lookup::Invalid);
        }

        let index = self.index.read();
        let offset = index.get(&word).copied();
        match offset {
            Some(offset) => {
                let resolver = self.resolver.read();
                let resolver = resolver.as_ref().ok_or(Error::NotLoaded)?;
                let text = resolver.definition(offset)?;
                Ok(Lookup::Definition { word, text })
            }
            None => Ok(Lookup::Suggestion(index.longest_prefix_of(&word).to_owned())),
        }
    }

    /// Headwords starting with `prefix`, case-insensitively, capped at the
    /// configured completion limit.
    pub fn complete(&self, prefix: &str) -> Result<Vec<String>> {
        self.ensure_loaded()?;
        let prefix = prefix.to_uppercase();
        Ok(self
            .index
            .read()
            .keys_with_prefix(&prefix, Some(self.config.completion_limit)))
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(Error::NotLoaded)
        }
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("path", &self.config.dictionary_path)
            .field("loaded", &self.is_loaded())
            .field("len", &self.len())
            .finish()
    }
}
