use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Source text plus the path it was read from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: Option<PathBuf>,
    contents: String,
}

impl File {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            path: None,
            contents: contents.into(),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            contents: contents.into(),
        }
    }

    /// Read a UTF-8 file from disk.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        Ok(Self::with_path(path, contents))
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Text in `range`, or `None` when the range is out of bounds or splits a
    /// character.
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.contents.get(range)
    }

    /// xxh3 hash of the contents.
    pub fn checksum(&self) -> u64 {
        xxh3_64(self.contents.as_bytes())
    }
}
