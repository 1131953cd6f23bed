use crate::source::DigestId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("cannot combine selections of {left} and {right}")]
    ForeignDigest { left: DigestId, right: DigestId },
}
