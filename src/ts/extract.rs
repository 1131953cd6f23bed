//! Lowering of a tree-sitter CST into a [`RawDigest`].
//!
//! Tokens are the classified leaves of the CST, with comments, literals,
//! attributes and lifetimes kept whole. Nodes are the classified constructs
//! only; anything unclassified is transparent and its classified
//! descendants are hoisted to the nearest classified ancestor.

use crate::kind::{Decl, EnumMember, Expr, Function, Impl, Kind, Method, Stmt, SyntaxType, Var};
use crate::source::{RawDigest, RawLine, RawNode, RawToken};
use std::ops::Range;
use tree_sitter::Node as CstNode;

/// Lower `root` (the `source_file` node) over `source`.
pub(crate) fn extract(source: &str, root: CstNode<'_>) -> RawDigest {
    let mut tokens = Vec::new();
    collect_tokens(source, root, &mut tokens);

    let file = RawNode::new(0..source.len(), Kind::SourceFile)
        .with_children(collect_nodes(source, root, Scope::Free));

    RawDigest {
        lines: RawLine::split(source),
        tokens,
        roots: vec![file],
    }
}

fn collect_tokens(source: &str, node: CstNode<'_>, out: &mut Vec<RawToken>) {
    if node.start_byte() == node.end_byte() {
        return;
    }
    if let Some(kind) = atomic_token(source, node) {
        out.push(RawToken::new(node.byte_range(), kind));
        return;
    }
    if node.child_count() == 0 {
        if let Some(kind) = leaf_token(node) {
            out.push(RawToken::new(node.byte_range(), kind));
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(source, child, out);
    }
}

/// Constructs that are one token regardless of their inner structure.
fn atomic_token(source: &str, node: CstNode<'_>) -> Option<SyntaxType> {
    let kind = match node.kind() {
        "line_comment" | "block_comment" => {
            if is_doc_comment(&source[node.byte_range()]) {
                SyntaxType::DocComment
            } else {
                SyntaxType::Comment
            }
        }
        "string_literal" | "raw_string_literal" => SyntaxType::String,
        "char_literal" => SyntaxType::Character,
        "integer_literal" | "float_literal" => SyntaxType::Number,
        "boolean_literal" => SyntaxType::Keyword,
        "attribute_item" | "inner_attribute_item" => SyntaxType::Attribute,
        "lifetime" => SyntaxType::Lifetime,
        _ => return None,
    };
    Some(kind)
}

fn leaf_token(node: CstNode<'_>) -> Option<SyntaxType> {
    let kind = node.kind();
    if node.is_named() {
        return match kind {
            "identifier" | "field_identifier" | "shorthand_field_identifier" | "metavariable" => {
                Some(SyntaxType::Identifier)
            }
            "type_identifier" | "primitive_type" => Some(SyntaxType::TypeIdentifier),
            "self" | "crate" | "super" | "mutable_specifier" => Some(SyntaxType::Keyword),
            _ => None,
        };
    }
    is_keyword(kind).then_some(SyntaxType::Keyword)
}

/// Anonymous leaves spelled as words (`fn`, `let`, `macro_rules!`).
fn is_keyword(kind: &str) -> bool {
    let word = kind.strip_suffix('!').unwrap_or(kind);
    word.bytes().any(|b| b.is_ascii_lowercase())
        && word.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}

fn is_doc_comment(text: &str) -> bool {
    (text.starts_with("///") && !text.starts_with("////"))
        || text.starts_with("//!")
        || (text.starts_with("/**") && !text.starts_with("/**/") && !text.starts_with("/***"))
        || text.starts_with("/*!")
}

/// Where a function sits, which decides how it is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Free,
    /// Directly inside an `impl` or `trait` body.
    Associated,
}

fn collect_nodes(source: &str, node: CstNode<'_>, scope: Scope) -> Vec<RawNode> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        lower(source, child, scope, &mut out);
    }
    out
}

/// Push `node` as a classified construct, or hoist its classified
/// descendants when it has no classification.
fn lower(source: &str, node: CstNode<'_>, scope: Scope, out: &mut Vec<RawNode>) {
    let Some(kind) = classify(node, scope) else {
        out.extend(collect_nodes(source, node, scope));
        return;
    };

    let mut raw = RawNode::new(node.byte_range(), kind.clone());
    if let Some((name, range)) = name_of(source, node) {
        raw = raw.named(name, range);
    }
    if let Some(range) = body_of(node) {
        raw = raw.with_body(range);
    }

    let inner = match node.kind() {
        "impl_item" | "trait_item" => Scope::Associated,
        _ => Scope::Free,
    };

    let children = match kind {
        Kind::Expr(Some(Expr::Call | Expr::MethodCall)) => {
            // The callee (a receiver chain, a path) is not part of the call's
            // argument list; its constructs become siblings placed before it.
            if let Some(callee) = node.child_by_field_name("function") {
                lower(source, callee, scope, out);
            }
            node.child_by_field_name("arguments")
                .map(|args| arguments(source, args))
                .unwrap_or_default()
        }
        _ => collect_nodes(source, node, inner),
    };

    out.push(raw.with_children(children));
}

/// One `expr.argument` per expression in an argument list.
fn arguments(source: &str, args: CstNode<'_>) -> Vec<RawNode> {
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .filter(|arg| !arg.is_extra() && arg.kind() != "attribute_item")
        .map(|arg| {
            let mut nested = Vec::new();
            lower(source, arg, Scope::Free, &mut nested);
            RawNode::new(arg.byte_range(), Expr::Argument)
                .with_body(arg.byte_range())
                .with_children(nested)
        })
        .collect()
}

fn classify(node: CstNode<'_>, scope: Scope) -> Option<Kind> {
    let kind: Kind = match node.kind() {
        "function_item" => {
            let function = match scope {
                Scope::Free => Function::Free,
                Scope::Associated if has_self_parameter(node) => {
                    Function::Method(Method::Instance)
                }
                Scope::Associated => Function::Method(Method::Static),
            };
            Decl::Function(function).into()
        }
        "function_signature_item" => Decl::Function(Function::Signature).into(),
        "struct_item" => Decl::Struct.into(),
        "union_item" => Decl::Union.into(),
        "enum_item" => Decl::Enum(None).into(),
        "enum_variant" => Decl::Enum(Some(EnumMember::Variant)).into(),
        "field_declaration" => Decl::Field.into(),
        "trait_item" => Decl::Trait.into(),
        "impl_item" => {
            let trait_impl = node.child_by_field_name("trait").map(|_| Impl::Trait);
            Decl::Impl(trait_impl).into()
        }
        "mod_item" => Decl::Module.into(),
        "const_item" => Decl::Const.into(),
        "static_item" => Decl::Static.into(),
        "type_item" => Decl::TypeAlias.into(),
        "associated_type" => Decl::AssociatedType.into(),
        "use_declaration" => Decl::Use.into(),
        "extern_crate_declaration" => Decl::ExternCrate.into(),
        "macro_definition" => Decl::Macro.into(),
        "let_declaration" => Decl::Var(Var::Local).into(),
        "parameter" => Decl::Var(Var::Parameter).into(),
        "self_parameter" => Decl::Var(Var::SelfParameter).into(),

        "call_expression" => {
            let method = node
                .child_by_field_name("function")
                .is_some_and(is_method_callee);
            if method {
                Expr::MethodCall.into()
            } else {
                Expr::Call.into()
            }
        }
        "macro_invocation" => Expr::Macro.into(),
        "closure_expression" => Expr::Closure.into(),
        "array_expression" => Expr::Array.into(),
        "struct_expression" => Expr::Struct.into(),
        "tuple_expression" => Expr::Tuple.into(),

        "if_expression" | "if_let_expression" => Stmt::If.into(),
        "match_expression" => Stmt::Match.into(),
        "match_arm" => Stmt::Case.into(),
        "for_expression" => Stmt::For.into(),
        "while_expression" | "while_let_expression" => Stmt::While.into(),
        "loop_expression" => Stmt::Loop.into(),
        "return_expression" => Stmt::Return.into(),
        _ => return None,
    };
    Some(kind)
}

fn has_self_parameter(function: CstNode<'_>) -> bool {
    let Some(params) = function.child_by_field_name("parameters") else {
        return false;
    };
    let mut cursor = params.walk();
    let found = params
        .named_children(&mut cursor)
        .any(|p| p.kind() == "self_parameter");
    found
}

fn name_of(source: &str, node: CstNode<'_>) -> Option<(String, Range<usize>)> {
    let target = match node.kind() {
        "impl_item" => node.child_by_field_name("type"),
        "use_declaration" => node.child_by_field_name("argument"),
        "let_declaration" | "parameter" => node.child_by_field_name("pattern"),
        "self_parameter" => self_keyword(node),
        "call_expression" => node.child_by_field_name("function").and_then(callee_name),
        "macro_invocation" => node.child_by_field_name("macro").map(last_segment),
        _ => node.child_by_field_name("name"),
    }?;
    let range = target.byte_range();
    Some((source[range.clone()].to_string(), range))
}

fn self_keyword(node: CstNode<'_>) -> Option<CstNode<'_>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == "self");
    found
}

/// `a.f` or `a.f::<T>`.
fn is_method_callee(function: CstNode<'_>) -> bool {
    match function.kind() {
        "field_expression" => true,
        "generic_function" => function
            .child_by_field_name("function")
            .is_some_and(|inner| inner.kind() == "field_expression"),
        _ => false,
    }
}

/// The identifier a call is made through: `f`, `a.f`, `m::f`, `f::<T>`.
fn callee_name(function: CstNode<'_>) -> Option<CstNode<'_>> {
    match function.kind() {
        "identifier" => Some(function),
        "field_expression" => function.child_by_field_name("field"),
        "scoped_identifier" => function.child_by_field_name("name"),
        "generic_function" => function
            .child_by_field_name("function")
            .and_then(callee_name),
        _ => None,
    }
}

fn last_segment(path: CstNode<'_>) -> CstNode<'_> {
    match path.kind() {
        "scoped_identifier" => path.child_by_field_name("name").unwrap_or(path),
        _ => path,
    }
}

fn body_of(node: CstNode<'_>) -> Option<Range<usize>> {
    let body = match node.kind() {
        "call_expression" => node.child_by_field_name("arguments"),
        "macro_invocation" => {
            let mut cursor = node.walk();
            let tree = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "token_tree");
            tree
        }
        "array_expression" | "tuple_expression" => Some(node),
        "let_declaration" | "const_item" | "static_item" | "match_arm" => {
            node.child_by_field_name("value")
        }
        "if_expression" => node.child_by_field_name("consequence"),
        "return_expression" => node.named_child(0),
        "type_item" => node.child_by_field_name("type"),
        _ => node.child_by_field_name("body"),
    }?;
    Some(inner_range(body))
}

/// `body`'s range without its surrounding delimiters, if it has any.
fn inner_range(body: CstNode<'_>) -> Range<usize> {
    let count = body.child_count();
    if count >= 2 {
        if let (Some(open), Some(close)) = (body.child(0), body.child(count - 1)) {
            let delimited = matches!(
                (open.kind(), close.kind()),
                ("{", "}") | ("(", ")") | ("[", "]")
            );
            if delimited {
                return open.end_byte()..close.start_byte();
            }
        }
    }
    body.byte_range()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_spelling() {
        assert!(is_keyword("fn"));
        assert!(is_keyword("macro_rules!"));
        assert!(!is_keyword("!"));
        assert!(!is_keyword("_"));
        assert!(!is_keyword("::"));
        assert!(!is_keyword("Self"));
    }

    #[test]
    fn doc_comment_spelling() {
        assert!(is_doc_comment("/// doc"));
        assert!(is_doc_comment("//! inner"));
        assert!(is_doc_comment("/** block */"));
        assert!(is_doc_comment("/*! inner block */"));
        assert!(!is_doc_comment("// plain"));
        assert!(!is_doc_comment("//// banner"));
        assert!(!is_doc_comment("/**/"));
        assert!(!is_doc_comment("/* plain */"));
    }
}
