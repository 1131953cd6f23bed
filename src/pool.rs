//! Thread-local parser pooling.
//!
//! Creates a parser on first use per thread and reuses it for every later
//! [`Digest::parse`](crate::source::Digest::parse) on that thread.

use crate::ts::{RustParser, TreeSitterError};
use std::cell::RefCell;

thread_local! {
    static RUST_PARSER: RefCell<Option<RustParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use slang::pool::with_parser;
///
/// let clean = with_parser(|parser| parser.parse("fn main() {}").map(|p| !p.has_errors()))??;
/// assert!(clean);
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, TreeSitterError>
where
    F: FnOnce(&mut RustParser) -> R,
{
    RUST_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(RustParser::new()?);
        }
        match slot.as_mut() {
            Some(parser) => Ok(f(parser)),
            None => Err(TreeSitterError::ParserInit),
        }
    })
}
