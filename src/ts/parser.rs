use crate::ts::errors::TreeSitterError;
use ast_grep_language::{LanguageExt, SupportLang};
use std::fmt;
use std::ops::Range;
use tree_sitter::{Node as CstNode, Parser, Tree};

/// A tree-sitter parser loaded with the Rust grammar.
pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self, TreeSitterError> {
        let language = SupportLang::Rust.get_ts_language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|_| TreeSitterError::LanguageSet)?;
        Ok(Self { parser })
    }

    /// Parse `source` from scratch. Syntax errors do not fail the parse;
    /// see [`ParsedSource::syntax_errors`].
    pub fn parse<'s>(&mut self, source: &'s str) -> Result<ParsedSource<'s>, TreeSitterError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(TreeSitterError::ParseFailed)?;
        Ok(ParsedSource { source, tree })
    }
}

/// A concrete syntax tree together with the text it was parsed from.
pub struct ParsedSource<'s> {
    source: &'s str,
    tree: Tree,
}

impl<'s> ParsedSource<'s> {
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The `source_file` node.
    pub fn root(&self) -> CstNode<'_> {
        self.tree.root_node()
    }

    pub fn has_errors(&self) -> bool {
        self.root().has_error()
    }

    /// ERROR and MISSING nodes in file order. Nodes nested inside an ERROR
    /// node are not reported separately.
    pub fn syntax_errors(&self) -> Vec<SyntaxError> {
        let mut errors = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                errors.push(SyntaxError::at(node));
            } else if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<_> = node.children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }
        errors
    }
}

/// A recovered syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub range: Range<usize>,
    /// One-based.
    pub line: usize,
    /// One-based byte column.
    pub column: usize,
    /// The grammar symbol the parser inserted, for MISSING nodes.
    pub missing: Option<&'static str>,
}

impl SyntaxError {
    fn at(node: CstNode<'_>) -> Self {
        let start = node.start_position();
        Self {
            range: node.byte_range(),
            line: start.row + 1,
            column: start.column + 1,
            missing: node.is_missing().then(|| node.kind()),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.missing {
            Some(kind) => write!(f, "{}:{}: missing `{kind}`", self.line, self.column),
            None => write!(f, "{}:{}: unexpected input", self.line, self.column),
        }
    }
}
