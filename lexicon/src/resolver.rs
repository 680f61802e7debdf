//! Reading definitions back from the dictionary file.
//!
//! A definition starts at an offset recorded by the [loader](crate::loader)
//! and runs until the next separator. Full lines keep their `\n`; the text
//! in front of the separator on the closing line is appended as is.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::config::ResolverKind;
use crate::error::{Error, Result};
use crate::loader::trim_line_ending;

/// Source of definition text for stored offsets.
pub trait Resolve: Send + Sync {
    /// The definition starting at byte `offset`.
    fn definition(&self, offset: u64) -> Result<String>;
}

/// Reopens the file and seeks for every lookup.
#[derive(Debug, Clone)]
pub struct FileResolver {
    path: PathBuf,
    separator: char,
}

impl FileResolver {
    /// Resolver over the file at `path`.
    pub fn new(path: impl Into<PathBuf>, separator: char) -> Self {
        Self {
            path: path.into(),
            separator,
        }
    }
}

impl Resolve for FileResolver {
    fn definition(&self, offset: u64) -> Result<String> {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();
        if offset > len {
            return Err(Error::OffsetOutOfRange { offset, len });
        }
        file.seek(SeekFrom::Start(offset))?;
        read_definition(BufReader::new(file), self.separator, offset)
    }
}

/// Maps the whole file once and slices it for every lookup.
#[derive(Debug)]
pub struct MmapResolver {
    map: Mmap,
    separator: char,
}

impl MmapResolver {
    /// Map the file at `path`.
    pub fn open(path: &Path, separator: char) -> Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the dictionary is opened read-only and is not expected to be
        // modified while the process runs; a truncation underneath the map
        // would fault on access.
        let map = unsafe { Mmap::map(&file)? };
        Ok(Self { map, separator })
    }
}

impl Resolve for MmapResolver {
    fn definition(&self, offset: u64) -> Result<String> {
        let len = self.map.len() as u64;
        if offset > len {
            return Err(Error::OffsetOutOfRange { offset, len });
        }
        read_definition(&self.map[offset as usize..], self.separator, offset)
    }
}

/// Open the resolver selected by `kind`.
pub fn open(kind: ResolverKind, path: &Path, separator: char) -> Result<Box<dyn Resolve>> {
    Ok(match kind {
        ResolverKind::File => Box::new(FileResolver::new(path, separator)),
        ResolverKind::Mmap => Box::new(MmapResolver::open(path, separator)?),
    })
}

fn read_definition<R: BufRead>(mut reader: R, separator: char, offset: u64) -> Result<String> {
    let mut out = String::new();
    let mut buf = Vec::new();
    let mut pos = offset;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        let line = std::str::from_utf8(&buf).map_err(|_| Error::Encoding { offset: pos })?;
        pos += n as u64;

        let line = trim_line_ending(line);
        if let Some((head, _)) = line.split_once(separator) {
            out.push_str(head);
            break;
        }
        out.push_str(line);
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::loader::entries;

    const TEXT: &str = "@SHE\nтя\nона\n@SHELL\nчерупка\nзавършек@SHORE\nбряг\n";

    fn fixture() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TEXT.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn offsets() -> Vec<(String, u64)> {
        entries(TEXT.as_bytes(), '@')
            .map(|e| e.map(|e| (e.key, e.offset)))
            .collect::<Result<_>>()
            .unwrap()
    }

    fn check(resolver: &dyn Resolve) {
        let want = ["тя\nона\n", "черупка\nзавършек", "бряг\n"];
        let got: Vec<String> = offsets()
            .into_iter()
            .map(|(_, offset)| resolver.definition(offset).unwrap())
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_read_definition() {
        assert_eq!(read_definition("a\nb\n@K\nc\n".as_bytes(), '@', 0).unwrap(), "a\nb\n");
        assert_eq!(read_definition("tail@K\n".as_bytes(), '@', 0).unwrap(), "tail");
        assert_eq!(read_definition("".as_bytes(), '@', 0).unwrap(), "");
        assert_eq!(read_definition("crlf\r\n@K".as_bytes(), '@', 0).unwrap(), "crlf\n");
    }

    #[test]
    fn test_read_definition_invalid_utf8() {
        let bytes: &[u8] = b"ok\n\xc3\n";
        match read_definition(bytes, '@', 10) {
            Err(Error::Encoding { offset }) => assert_eq!(offset, 13),
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_file_resolver() {
        let file = fixture();
        check(&FileResolver::new(file.path(), '@'));
    }

    #[test]
    fn test_mmap_resolver() {
        let file = fixture();
        check(&MmapResolver::open(file.path(), '@').unwrap());
    }

    #[test]
    fn test_open_by_kind() {
        let file = fixture();
        for kind in [ResolverKind::File, ResolverKind::Mmap] {
            let resolver = open(kind, file.path(), '@').unwrap();
            check(resolver.as_ref());
        }
    }

    #[test]
    fn test_offset_out_of_range() {
        let file = fixture();
        let len = TEXT.len() as u64;
        for kind in [ResolverKind::File, ResolverKind::Mmap] {
            let resolver = open(kind, file.path(), '@').unwrap();
            assert_eq!(resolver.definition(len).unwrap(), "");
            match resolver.definition(len + 1) {
                Err(Error::OffsetOutOfRange { offset, len: l }) => {
                    assert_eq!(offset, len + 1);
                    assert_eq!(l, len);
                }
                other => panic!("expected out of range, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        assert!(matches!(
            FileResolver::new(&path, '@').definition(0),
            Err(Error::Io(_))
        ));
        assert!(matches!(MmapResolver::open(&path, '@'), Err(Error::Io(_))));
    }
}
