use crate::source::{Digest, Slice};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// One line of a file. The range excludes the line terminator.
#[derive(Clone, Copy)]
pub struct Line<'d> {
    digest: &'d Digest,
    position: usize,
}

impl<'d> Line<'d> {
    pub(crate) fn new(digest: &'d Digest, position: usize) -> Self {
        Self { digest, position }
    }

    /// Zero-based line number as reported by the parser.
    pub fn index(&self) -> usize {
        self.digest.line_data(self.position).index
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

impl<'d> Slice<'d> for Line<'d> {
    fn digest(&self) -> &'d Digest {
        self.digest
    }

    fn range(&self) -> Range<usize> {
        self.digest.line_data(self.position).range.clone()
    }
}

impl PartialEq for Line<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.digest.id() == other.digest.id() && self.position == other.position
    }
}

impl Eq for Line<'_> {}

impl Hash for Line<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.id().hash(state);
        self.position.hash(state);
    }
}

impl fmt::Debug for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({} {:?})", self.index(), self.contents())
    }
}
