//! Slang: progressive queries over parsed Rust sources
//!
//! A [`Digest`] is the immutable, parsed form of one file: its lines, its
//! classified token stream and a syntax tree of classified constructs.
//! Queries start from a digest and narrow step by step, each step returning
//! a fresh [`Selection`] bound to the same digest.
//!
//! # Architecture
//!
//! - [`source`]: the digest and the `Copy` handles pointing into it.
//! - [`query`]: fragment (regex), token (stream order) and tree
//!   (containment) selections.
//! - [`kind`]: the dotted kind taxonomy shared by tokens and nodes.
//! - [`edit`]: standalone edits applied in any order.
//! - [`ts`]: the tree-sitter front end producing digests.
//! - [`view`]: typed views over nodes.
//!
//! # Example
//!
//! ```no_run
//! use slang::kind::{Kind, SyntaxType};
//! use slang::source::{Digest, File};
//! use slang::{applying, Edit, Slice};
//!
//! let digest = Digest::parse(File::new("const LIMIT: u32 = 123;"))?;
//! let number = digest
//!     .query()
//!     .tokens()
//!     .first_of(Kind::Syntax(SyntaxType::Number));
//!
//! let edits: Vec<Edit> = number.iter().map(|t| Edit::of_slice(&t, "456")).collect();
//! assert_eq!(applying(digest.text(), &edits)?, "const LIMIT: u32 = 456;");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod config;
pub mod edit;
pub mod kind;
pub mod pool;
pub mod query;
pub mod source;
pub mod ts;
pub mod view;

// Re-exports
pub use config::{load_from_path, load_from_str, ConfigError, EditPlan};
pub use edit::{
    apply_to_file, applying, applying_disjoint, check_disjoint, Edit, EditError, FileEditResult,
};
pub use kind::Kind;
pub use query::{FragmentQuery, Predicate, QueryError, Selection, TokenQuery, TreeQuery};
pub use source::{Digest, DigestError, File, Fragment, Line, Node, Slice, Token};
pub use ts::{RustParser, TreeSitterError};
pub use view::{FunctionCall, FunctionSignature, NodeView};
