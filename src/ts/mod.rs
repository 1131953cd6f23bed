//! Tree-sitter front end: builds a [`Digest`] from Rust source.

pub mod errors;
mod extract;
pub mod parser;

pub use errors::TreeSitterError;
pub use parser::{ParsedSource, RustParser, SyntaxError};

use crate::pool::with_parser;
use crate::source::{Digest, File, RawDigest};
use std::path::Path;

impl Digest {
    /// Parse Rust source into a digest, using this thread's pooled parser.
    ///
    /// Syntax errors are logged and the recovered tree is kept.
    pub fn parse(file: File) -> Result<Digest, TreeSitterError> {
        let raw = lower(&file)?;
        Ok(Digest::new(file, raw)?)
    }

    /// Read and parse a file from disk.
    pub fn parse_path(path: impl AsRef<Path>) -> Result<Digest, TreeSitterError> {
        let path = path.as_ref();
        let file = File::read(path).map_err(|source| TreeSitterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Digest::parse(file)
    }
}

/// Parse `file` and lower the tree without building the digest.
pub fn lower(file: &File) -> Result<RawDigest, TreeSitterError> {
    with_parser(|parser| -> Result<RawDigest, TreeSitterError> {
        let parsed = parser.parse(file.contents())?;
        if parsed.has_errors() {
            let errors = parsed.syntax_errors();
            tracing::warn!(
                path = ?file.path(),
                count = errors.len(),
                first = ?errors.first().map(ToString::to_string),
                "syntax errors in source; continuing with the recovered tree"
            );
        }
        Ok(extract::extract(parsed.source(), parsed.root()))
    })?
}
