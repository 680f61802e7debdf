//! Dictionary file scanning.
//!
//! The file is line oriented. A line containing the separator is a key
//! line: the headword is everything after the first separator. The value
//! recorded for a headword is the byte offset of the line that follows its
//! key line, where the definition starts.
//!
//! ```text
//! @APPLE
//! ябълка
//! @BANANA
//! банан
//! ```

use std::io::BufRead;
use std::time::{Duration, Instant};

use alphatrie::SymbolMap;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A headword and the offset of its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Text after the separator on the key line.
    pub key: String,
    /// Byte offset of the first definition line.
    pub offset: u64,
    /// 1-based line number of the key line.
    pub line: usize,
}

/// Iterator over the key lines of a dictionary, see [`entries`].
pub struct Entries<R> {
    reader: R,
    separator: Vec<u8>,
    offset: u64,
    line: usize,
    buf: Vec<u8>,
}

/// Scan `reader` for key lines.
///
/// Offsets are exact byte positions, including `\r\n` line endings. Lines
/// are split on raw bytes, so only the headword itself has to be UTF-8; a
/// headword that is not yields [`Error::Encoding`] and scanning continues.
pub fn entries<R: BufRead>(reader: R, separator: char) -> Entries<R> {
    Entries {
        reader,
        separator: separator.to_string().into_bytes(),
        offset: 0,
        line: 0,
        buf: Vec::new(),
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            let start = self.offset;
            let n = match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(n) => n,
                Err(e) => return Some(Err(e.into())),
            };
            self.offset += n as u64;
            self.line += 1;

            let line = trim_line_ending_bytes(&self.buf);
            let Some(at) = line
                .windows(self.separator.len())
                .position(|w| w == self.separator.as_slice())
            else {
                continue;
            };
            let key = &line[at + self.separator.len()..];
            return Some(match std::str::from_utf8(key) {
                Ok(key) => Ok(Entry {
                    key: key.to_owned(),
                    offset: self.offset,
                    line: self.line,
                }),
                Err(_) => Err(Error::Encoding { offset: start }),
            });
        }
    }
}

fn trim_line_ending_bytes(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Strip a trailing `\n` or `\r\n`.
pub(crate) fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Counters from one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Key lines seen.
    pub entries: usize,
    /// Key lines dropped because the headword is not UTF-8 or not valid over
    /// the alphabet.
    pub skipped: usize,
    /// Distinct headwords in the index afterwards.
    pub keys: usize,
    /// Wall time spent scanning.
    pub elapsed: Duration,
}

/// Insert every valid headword of `reader` into `index`.
///
/// Headwords that are not UTF-8 or have characters outside the index's
/// alphabet are logged and skipped. A repeated headword keeps the offset of
/// its last occurrence.
pub fn load_into<R: BufRead>(
    reader: R,
    separator: char,
    index: &mut SymbolMap<u64>,
) -> Result<LoadStats> {
    let started = Instant::now();
    let mut stats = LoadStats::default();

    for entry in entries(reader, separator) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(Error::Encoding { offset }) => {
                warn!(offset, "skipping headword that is not UTF-8");
                stats.entries += 1;
                stats.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        stats.entries += 1;

        if !index.alphabet().is_valid(&entry.key) {
            warn!(line = entry.line, key = %entry.key, "skipping headword outside the alphabet");
            stats.skipped += 1;
            continue;
        }
        if index.put(&entry.key, entry.offset).is_some() {
            debug!(line = entry.line, key = %entry.key, "duplicate headword, keeping the later one");
        }
    }

    stats.keys = index.len();
    stats.elapsed = started.elapsed();
    Ok(stats)
}
