use std::ops::Range;
use thiserror::Error;

/// Parser output that violates the digest's range contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("{what} range [{}, {}) is outside a file of length {file_len}", .range.start, .range.end)]
    InvalidRange {
        what: &'static str,
        range: Range<usize>,
        file_len: usize,
    },

    #[error("{what} range [{}, {}) does not fall on UTF-8 character boundaries", .range.start, .range.end)]
    NotCharBoundary {
        what: &'static str,
        range: Range<usize>,
    },

    #[error("token {index} starts at byte {start}, before the preceding token")]
    UnorderedTokens { index: usize, start: usize },
}
