use crate::source::{Digest, Slice};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A byte range of a digest's file.
///
/// Two fragments are equal when they cover the same range of the same
/// digest.
#[derive(Clone, Copy)]
pub struct Fragment<'d> {
    digest: &'d Digest,
    start: usize,
    end: usize,
}

impl<'d> Fragment<'d> {
    pub(crate) fn new(digest: &'d Digest, range: Range<usize>) -> Self {
        Self {
            digest,
            start: range.start,
            end: range.end,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Sub-fragment over `relative`, offsets counted from this fragment's
    /// start. `None` when it leaves the fragment or splits a character.
    pub fn slice(&self, relative: Range<usize>) -> Option<Fragment<'d>> {
        if relative.start > relative.end || relative.end > self.len() {
            return None;
        }
        let absolute = self.start + relative.start..self.start + relative.end;
        self.digest.fragment(absolute)
    }
}

impl<'d> Slice<'d> for Fragment<'d> {
    fn digest(&self) -> &'d Digest {
        self.digest
    }

    fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl PartialEq for Fragment<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.digest.id() == other.digest.id() && self.start == other.start && self.end == other.end
    }
}

impl Eq for Fragment<'_> {}

impl Hash for Fragment<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.id().hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Debug for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment({}..{} {:?})", self.start, self.end, self.contents())
    }
}
