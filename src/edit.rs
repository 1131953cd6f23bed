//! Order-independent text edits.
//!
//! An [`Edit`] is a standalone value: it knows a byte position in some text,
//! not which text. A batch is applied tail-first so that splicing one edit
//! never moves the offsets of the edits still waiting.

use crate::source::Slice;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single splice at byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[must_use = "Edit does nothing until applied"]
pub enum Edit {
    Insert { at: usize, text: String },
    Replace { range: Range<usize>, text: String },
    Remove { range: Range<usize> },
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Invalid byte range: [{byte_start}, {byte_end}) in text of length {text_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        text_len: usize,
    },

    #[error("Byte offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },

    #[error("Edits {first} and {second} overlap")]
    Overlapping { first: usize, second: usize },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of [`apply_to_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FileEditResult should be checked for applied/unchanged"]
pub enum FileEditResult {
    Applied {
        path: PathBuf,
        bytes_before: usize,
        bytes_after: usize,
    },
    /// The edits produced the text already on disk; nothing was written.
    Unchanged { path: PathBuf },
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Edit::Insert {
            at,
            text: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Edit::Replace {
            range,
            text: text.into(),
        }
    }

    pub fn remove(range: Range<usize>) -> Self {
        Edit::Remove { range }
    }

    /// Replace whatever `slice` covers with `text`.
    pub fn of_slice<'d>(slice: &impl Slice<'d>, text: impl Into<String>) -> Self {
        Edit::replace(slice.range(), text)
    }

    /// Replace `old` with the contents of `new`, both from query results.
    pub fn substitute<'d, 'e>(old: &impl Slice<'d>, new: &impl Slice<'e>) -> Self {
        Edit::replace(old.range(), new.contents())
    }

    /// Insertion index or range start; the sort key for batches.
    pub fn effective_start(&self) -> usize {
        match self {
            Edit::Insert { at, .. } => *at,
            Edit::Replace { range, .. } | Edit::Remove { range } => range.start,
        }
    }

    /// The range of the original text this edit consumes (empty for inserts).
    pub fn span(&self) -> Range<usize> {
        match self {
            Edit::Insert { at, .. } => *at..*at,
            Edit::Replace { range, .. } | Edit::Remove { range } => range.clone(),
        }
    }

    /// Text written in place of the span.
    pub fn text(&self) -> &str {
        match self {
            Edit::Insert { text, .. } | Edit::Replace { text, .. } => text,
            Edit::Remove { .. } => "",
        }
    }

    /// Two edits conflict when their spans intersect or they start at the
    /// same offset.
    pub fn conflicts_with(&self, other: &Edit) -> bool {
        let (a, b) = (self.span(), other.span());
        a.start == b.start || (a.start < b.end && b.start < a.end)
    }

    pub fn apply(&self, text: &str) -> Result<String, EditError> {
        let mut out = text.to_string();
        self.apply_in_place(&mut out)?;
        Ok(out)
    }

    pub fn apply_in_place(&self, text: &mut String) -> Result<(), EditError> {
        let span = self.span();
        if span.start > span.end || span.end > text.len() {
            return Err(EditError::InvalidByteRange {
                byte_start: span.start,
                byte_end: span.end,
                text_len: text.len(),
            });
        }
        for offset in [span.start, span.end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        text.replace_range(span, self.text());
        Ok(())
    }
}

/// Apply `edits` to `text`, whatever order they come in.
///
/// Edits are applied by descending effective start. Edits sharing a start
/// keep their relative order. Overlap is not checked; see
/// [`applying_disjoint`].
pub fn applying(text: &str, edits: &[Edit]) -> Result<String, EditError> {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| Reverse(edit.effective_start()));

    let mut out = text.to_string();
    for edit in ordered {
        edit.apply_in_place(&mut out)?;
    }
    tracing::debug!(
        edits = edits.len(),
        before = text.len(),
        after = out.len(),
        "edits applied"
    );
    Ok(out)
}

/// First pair of conflicting edits, by batch index.
pub fn check_disjoint(edits: &[Edit]) -> Result<(), EditError> {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| (edits[i].effective_start(), edits[i].span().end));

    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if edits[a].conflicts_with(&edits[b]) {
            return Err(EditError::Overlapping {
                first: a.min(b),
                second: a.max(b),
            });
        }
    }
    // Neighbors can miss a long span covering several later edits.
    let mut reach: Option<(usize, usize)> = None;
    for &i in &order {
        let span = edits[i].span();
        if let Some((end, owner)) = reach {
            if span.start < end {
                return Err(EditError::Overlapping {
                    first: owner.min(i),
                    second: owner.max(i),
                });
            }
        }
        if reach.map_or(true, |(end, _)| span.end > end) {
            reach = Some((span.end, i));
        }
    }
    Ok(())
}

/// [`check_disjoint`], then [`applying`].
pub fn applying_disjoint(text: &str, edits: &[Edit]) -> Result<String, EditError> {
    check_disjoint(edits)?;
    applying(text, edits)
}

/// Read `path`, apply a disjoint batch and write the result back atomically.
pub fn apply_to_file(path: impl AsRef<Path>, edits: &[Edit]) -> Result<FileEditResult, EditError> {
    let path = path.as_ref();
    let original = fs::read_to_string(path)?;
    let updated = applying_disjoint(&original, edits)?;

    if updated == original {
        return Ok(FileEditResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    write_file(path, &updated)?;
    tracing::debug!(path = %path.display(), edits = edits.len(), "file rewritten");

    Ok(FileEditResult::Applied {
        path: path.to_path_buf(),
        bytes_before: original.len(),
        bytes_after: updated.len(),
    })
}

/// Replace the contents of `path` atomically and bump its mtime.
pub fn write_file(path: &Path, contents: &str) -> Result<(), EditError> {
    atomic_write(path, contents.as_bytes())?;

    // Build tools watching the file key off mtime.
    let now = filetime::FileTime::now();
    filetime::set_file_mtime(path, now)?;
    Ok(())
}

/// Atomic file write: tempfile + fsync + rename.
fn atomic_write(path: &Path, content: &[u8]) -> Result<(), EditError> {
    // Same directory keeps the rename on one filesystem.
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(EditError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            )))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
