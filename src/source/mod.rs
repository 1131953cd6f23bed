//! Parsed source files and the handles that point into them.
//!
//! A [`Digest`] owns everything. [`Fragment`], [`Line`], [`Token`] and
//! [`Node`] are small `Copy` views borrowing the digest they came from.

mod digest;
pub mod errors;
mod file;
mod fragment;
mod line;
mod node;
pub mod raw;
mod token;

pub use digest::{Digest, DigestId, NodeId, Queries, TokenId};
pub use errors::DigestError;
pub use file::File;
pub use fragment::Fragment;
pub use line::Line;
pub use node::{Children, Node};
pub use raw::{RawDigest, RawLine, RawNode, RawToken};
pub use token::Token;

pub(crate) use digest::overlaps;

use std::ops::Range;

/// Anything that covers a byte range of a digest's file.
pub trait Slice<'d>: Copy {
    fn digest(&self) -> &'d Digest;

    fn range(&self) -> Range<usize>;

    /// The covered text.
    fn contents(&self) -> &'d str {
        let digest = self.digest();
        // Ranges are validated when the digest is built.
        &digest.text()[self.range()]
    }

    fn fragment(&self) -> Fragment<'d> {
        Fragment::new(self.digest(), self.range())
    }

    fn lines(&self) -> Vec<Line<'d>> {
        self.digest().lines_in(self.range())
    }

    fn tokens(&self) -> Vec<Token<'d>> {
        self.digest().tokens_in(self.range())
    }
}
