//! Prefix registry used by [`Kind::decode`](super::Kind::decode).
//!
//! Each group claims a dotted prefix and decodes only its own members.
//! Groups are listed most specific first; a group that claims a string but
//! cannot decode it hands over to the next, less specific, group.

use super::{
    Decl, EnumMember, Expr, Function, Identified, Impl, Kind, Method, Stmt, SyntaxType, Var,
    DECL_ENUM, DECL_IMPL, EXPR, SOURCE_FILE, STMT,
};

pub(super) struct Group {
    pub(super) prefix: &'static str,
    decode: fn(&str) -> Option<Kind>,
}

pub(super) const REGISTRY: &[Group] = &[
    Group {
        prefix: "source.lang.rust.decl.function.method.",
        decode: decode_method,
    },
    Group {
        prefix: "source.lang.rust.decl.function.",
        decode: decode_function,
    },
    Group {
        prefix: "source.lang.rust.syntaxtype.",
        decode: decode_syntax,
    },
    Group {
        prefix: "source.lang.rust.decl.enum",
        decode: decode_enum,
    },
    Group {
        prefix: "source.lang.rust.decl.impl",
        decode: decode_impl,
    },
    Group {
        prefix: "source.lang.rust.decl.var.",
        decode: decode_var,
    },
    Group {
        prefix: "source.lang.rust.decl.",
        decode: decode_decl,
    },
    Group {
        prefix: "source.lang.rust.expr",
        decode: decode_expr,
    },
    Group {
        prefix: "source.lang.rust.stmt",
        decode: decode_stmt,
    },
    Group {
        prefix: "source.lang.rust.",
        decode: decode_root,
    },
];

pub(super) fn decode(raw: &str) -> Option<Kind> {
    REGISTRY
        .iter()
        .filter(|group| raw.starts_with(group.prefix))
        .find_map(|group| (group.decode)(raw))
}

fn decode_method(raw: &str) -> Option<Kind> {
    Method::from_identifier(raw).map(|m| Kind::Decl(Decl::Function(Function::Method(m))))
}

fn decode_function(raw: &str) -> Option<Kind> {
    Function::FLAT
        .iter()
        .find(|f| f.identifier() == raw)
        .map(|f| Kind::Decl(Decl::Function(*f)))
}

fn decode_syntax(raw: &str) -> Option<Kind> {
    SyntaxType::from_identifier(raw).map(Kind::Syntax)
}

fn decode_enum(raw: &str) -> Option<Kind> {
    if raw == DECL_ENUM {
        return Some(Kind::Decl(Decl::Enum(None)));
    }
    EnumMember::from_identifier(raw).map(|m| Kind::Decl(Decl::Enum(Some(m))))
}

fn decode_impl(raw: &str) -> Option<Kind> {
    if raw == DECL_IMPL {
        return Some(Kind::Decl(Decl::Impl(None)));
    }
    Impl::from_identifier(raw).map(|i| Kind::Decl(Decl::Impl(Some(i))))
}

fn decode_var(raw: &str) -> Option<Kind> {
    Var::from_identifier(raw).map(|v| Kind::Decl(Decl::Var(v)))
}

fn decode_decl(raw: &str) -> Option<Kind> {
    Decl::FLAT
        .iter()
        .find(|d| d.identifier() == raw)
        .map(|d| Kind::Decl(*d))
}

fn decode_expr(raw: &str) -> Option<Kind> {
    if raw == EXPR {
        return Some(Kind::Expr(None));
    }
    Expr::from_identifier(raw).map(|e| Kind::Expr(Some(e)))
}

fn decode_stmt(raw: &str) -> Option<Kind> {
    if raw == STMT {
        return Some(Kind::Stmt(None));
    }
    Stmt::from_identifier(raw).map(|s| Kind::Stmt(Some(s)))
}

fn decode_root(raw: &str) -> Option<Kind> {
    (raw == SOURCE_FILE).then_some(Kind::SourceFile)
}
