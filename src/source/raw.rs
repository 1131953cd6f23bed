//! Parser output consumed by [`Digest::new`](super::Digest::new).
//!
//! These are plain data: ranges are UTF-8 byte offsets and kinds are raw
//! dotted identifiers. Anything that can produce them (the bundled
//! tree-sitter adapter, an external tool emitting JSON) can feed a digest.

use crate::kind::Kind;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDigest {
    #[serde(default)]
    pub lines: Vec<RawLine>,
    /// File-ordered.
    #[serde(default)]
    pub tokens: Vec<RawToken>,
    #[serde(default)]
    pub roots: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    pub index: usize,
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub range: Range<usize>,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub range: Range<usize>,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_range: Option<Range<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_range: Option<Range<usize>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
}

impl RawDigest {
    /// Lines plus a bare root spanning `text`; no tokens.
    pub fn plain(text: &str) -> Self {
        Self {
            lines: RawLine::split(text),
            tokens: Vec::new(),
            roots: vec![RawNode::new(0..text.len(), Kind::SourceFile)],
        }
    }
}

impl RawLine {
    /// Split `text` into lines. Ranges exclude the `\n` (and a preceding
    /// `\r`); a trailing newline does not open an extra line.
    pub fn split(text: &str) -> Vec<RawLine> {
        let mut offset = 0;
        text.split_inclusive('\n')
            .enumerate()
            .map(|(index, line)| {
                let start = offset;
                offset += line.len();
                let content = line.strip_suffix('\n').unwrap_or(line);
                let content = content.strip_suffix('\r').unwrap_or(content);
                RawLine {
                    index,
                    range: start..start + content.len(),
                }
            })
            .collect()
    }
}

impl RawToken {
    pub fn new(range: Range<usize>, kind: impl Into<Kind>) -> Self {
        Self {
            range,
            kind: String::from(kind.into()),
        }
    }
}

impl RawNode {
    pub fn new(range: Range<usize>, kind: impl Into<Kind>) -> Self {
        Self {
            range,
            kind: String::from(kind.into()),
            name: None,
            name_range: None,
            body_range: None,
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>, range: Range<usize>) -> Self {
        self.name = Some(name.into());
        self.name_range = Some(range);
        self
    }

    pub fn with_body(mut self, range: Range<usize>) -> Self {
        self.body_range = Some(range);
        self
    }

    pub fn with_children(mut self, children: Vec<RawNode>) -> Self {
        self.children = children;
        self
    }
}
