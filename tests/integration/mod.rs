//! End-to-end query and edit scenarios over real Rust sources.

mod edits;
mod fragments;
mod tokens;
mod tree;
mod views;

use slang::source::{Digest, File};

pub(crate) fn parse(source: &str) -> Digest {
    Digest::parse(File::new(source)).expect("sample parses")
}
