//! Classification of source constructs.
//!
//! Every token and tree node carries a [`Kind`]. Kinds are backed by stable,
//! dot-segmented identifiers under [`NAMESPACE`] (for example
//! `source.lang.rust.decl.function.method.instance`), which is also how an
//! external parser reports them. Decoding never fails: identifiers nobody
//! claims become [`Kind::Unknown`].

mod registry;

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Common prefix of every known identifier.
pub const NAMESPACE: &str = "source.lang.rust.";

/// A leaf group of the taxonomy: a closed set of variants, each with a fixed
/// identifier.
pub(crate) trait Identified: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn identifier(self) -> &'static str;

    fn from_identifier(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.identifier() == raw)
    }
}

/// Tagged classification decoded from a dotted identifier.
///
/// Equality is structural. An [`Kind::Unknown`] never equals a known variant,
/// even when its string is that variant's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    /// The synthetic root spanning a whole file.
    SourceFile,
    Decl(Decl),
    /// `None` is the bare `expr` grouping.
    Expr(Option<Expr>),
    /// `None` is the bare `stmt` grouping.
    Stmt(Option<Stmt>),
    Syntax(SyntaxType),
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decl {
    AssociatedType,
    Const,
    Enum(Option<EnumMember>),
    ExternCrate,
    Field,
    Function(Function),
    Impl(Option<Impl>),
    Macro,
    Module,
    Static,
    Struct,
    Trait,
    TypeAlias,
    Union,
    Use,
    Var(Var),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumMember {
    Variant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Impl {
    /// `impl Trait for Type`
    Trait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Free,
    Method(Method),
    /// Bodyless declaration inside a trait.
    Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Instance,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    Local,
    Parameter,
    SelfParameter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expr {
    Argument,
    Array,
    Call,
    Closure,
    Macro,
    MethodCall,
    Struct,
    Tuple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stmt {
    Case,
    For,
    If,
    Loop,
    Match,
    Return,
    While,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxType {
    Attribute,
    Character,
    Comment,
    DocComment,
    Identifier,
    Keyword,
    Lifetime,
    Number,
    String,
    TypeIdentifier,
}

pub(crate) const SOURCE_FILE: &str = "source.lang.rust.file";
pub(crate) const EXPR: &str = "source.lang.rust.expr";
pub(crate) const STMT: &str = "source.lang.rust.stmt";
pub(crate) const DECL_ENUM: &str = "source.lang.rust.decl.enum";
pub(crate) const DECL_IMPL: &str = "source.lang.rust.decl.impl";

impl Kind {
    /// Decode a raw identifier into the most specific known variant, or
    /// [`Kind::Unknown`].
    pub fn decode(raw: &str) -> Kind {
        registry::decode(raw).unwrap_or_else(|| Kind::Unknown(raw.to_string()))
    }

    /// The identifier this kind was (or would be) decoded from.
    pub fn encode(&self) -> &str {
        match self {
            Kind::SourceFile => SOURCE_FILE,
            Kind::Decl(decl) => decl.identifier(),
            Kind::Expr(None) => EXPR,
            Kind::Expr(Some(expr)) => expr.identifier(),
            Kind::Stmt(None) => STMT,
            Kind::Stmt(Some(stmt)) => stmt.identifier(),
            Kind::Syntax(syntax) => syntax.identifier(),
            Kind::Unknown(raw) => raw,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Kind::Unknown(_))
    }

    /// Every known variant, in taxonomy order.
    pub fn known() -> Vec<Kind> {
        let mut kinds = vec![Kind::SourceFile];
        kinds.extend(Decl::all().into_iter().map(Kind::Decl));
        kinds.push(Kind::Expr(None));
        kinds.extend(Expr::ALL.iter().map(|e| Kind::Expr(Some(*e))));
        kinds.push(Kind::Stmt(None));
        kinds.extend(Stmt::ALL.iter().map(|s| Kind::Stmt(Some(*s))));
        kinds.extend(SyntaxType::ALL.iter().map(|s| Kind::Syntax(*s)));
        kinds
    }
}

impl Decl {
    /// Declarations without nested groupings.
    pub(crate) const FLAT: &'static [Decl] = &[
        Decl::AssociatedType,
        Decl::Const,
        Decl::ExternCrate,
        Decl::Field,
        Decl::Macro,
        Decl::Module,
        Decl::Static,
        Decl::Struct,
        Decl::Trait,
        Decl::TypeAlias,
        Decl::Union,
        Decl::Use,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            Decl::AssociatedType => "source.lang.rust.decl.associatedtype",
            Decl::Const => "source.lang.rust.decl.const",
            Decl::Enum(None) => DECL_ENUM,
            Decl::Enum(Some(member)) => member.identifier(),
            Decl::ExternCrate => "source.lang.rust.decl.externcrate",
            Decl::Field => "source.lang.rust.decl.field",
            Decl::Function(function) => function.identifier(),
            Decl::Impl(None) => DECL_IMPL,
            Decl::Impl(Some(kind)) => kind.identifier(),
            Decl::Macro => "source.lang.rust.decl.macro",
            Decl::Module => "source.lang.rust.decl.module",
            Decl::Static => "source.lang.rust.decl.static",
            Decl::Struct => "source.lang.rust.decl.struct",
            Decl::Trait => "source.lang.rust.decl.trait",
            Decl::TypeAlias => "source.lang.rust.decl.typealias",
            Decl::Union => "source.lang.rust.decl.union",
            Decl::Use => "source.lang.rust.decl.use",
            Decl::Var(var) => var.identifier(),
        }
    }

    fn all() -> Vec<Decl> {
        let mut all = Decl::FLAT.to_vec();
        all.push(Decl::Enum(None));
        all.extend(EnumMember::ALL.iter().map(|m| Decl::Enum(Some(*m))));
        all.extend(Function::all().into_iter().map(Decl::Function));
        all.push(Decl::Impl(None));
        all.extend(Impl::ALL.iter().map(|i| Decl::Impl(Some(*i))));
        all.extend(Var::ALL.iter().map(|v| Decl::Var(*v)));
        all
    }
}

impl Function {
    pub(crate) const FLAT: &'static [Function] = &[Function::Free, Function::Signature];

    pub fn identifier(self) -> &'static str {
        match self {
            Function::Free => "source.lang.rust.decl.function.free",
            Function::Method(method) => method.identifier(),
            Function::Signature => "source.lang.rust.decl.function.signature",
        }
    }

    fn all() -> Vec<Function> {
        let mut all = Function::FLAT.to_vec();
        all.extend(Method::ALL.iter().map(|m| Function::Method(*m)));
        all
    }
}

impl Identified for EnumMember {
    const ALL: &'static [Self] = &[EnumMember::Variant];

    fn identifier(self) -> &'static str {
        match self {
            EnumMember::Variant => "source.lang.rust.decl.enum.variant",
        }
    }
}

impl Identified for Impl {
    const ALL: &'static [Self] = &[Impl::Trait];

    fn identifier(self) -> &'static str {
        match self {
            Impl::Trait => "source.lang.rust.decl.impl.trait",
        }
    }
}

impl Identified for Method {
    const ALL: &'static [Self] = &[Method::Instance, Method::Static];

    fn identifier(self) -> &'static str {
        match self {
            Method::Instance => "source.lang.rust.decl.function.method.instance",
            Method::Static => "source.lang.rust.decl.function.method.static",
        }
    }
}

impl Identified for Var {
    const ALL: &'static [Self] = &[Var::Local, Var::Parameter, Var::SelfParameter];

    fn identifier(self) -> &'static str {
        match self {
            Var::Local => "source.lang.rust.decl.var.local",
            Var::Parameter => "source.lang.rust.decl.var.parameter",
            Var::SelfParameter => "source.lang.rust.decl.var.self",
        }
    }
}

impl Identified for Expr {
    const ALL: &'static [Self] = &[
        Expr::Argument,
        Expr::Array,
        Expr::Call,
        Expr::Closure,
        Expr::Macro,
        Expr::MethodCall,
        Expr::Struct,
        Expr::Tuple,
    ];

    fn identifier(self) -> &'static str {
        match self {
            Expr::Argument => "source.lang.rust.expr.argument",
            Expr::Array => "source.lang.rust.expr.array",
            Expr::Call => "source.lang.rust.expr.call",
            Expr::Closure => "source.lang.rust.expr.closure",
            Expr::Macro => "source.lang.rust.expr.macro",
            Expr::MethodCall => "source.lang.rust.expr.methodcall",
            Expr::Struct => "source.lang.rust.expr.struct",
            Expr::Tuple => "source.lang.rust.expr.tuple",
        }
    }
}

impl Identified for Stmt {
    const ALL: &'static [Self] = &[
        Stmt::Case,
        Stmt::For,
        Stmt::If,
        Stmt::Loop,
        Stmt::Match,
        Stmt::Return,
        Stmt::While,
    ];

    fn identifier(self) -> &'static str {
        match self {
            Stmt::Case => "source.lang.rust.stmt.case",
            Stmt::For => "source.lang.rust.stmt.for",
            Stmt::If => "source.lang.rust.stmt.if",
            Stmt::Loop => "source.lang.rust.stmt.loop",
            Stmt::Match => "source.lang.rust.stmt.match",
            Stmt::Return => "source.lang.rust.stmt.return",
            Stmt::While => "source.lang.rust.stmt.while",
        }
    }
}

impl Identified for SyntaxType {
    const ALL: &'static [Self] = &[
        SyntaxType::Attribute,
        SyntaxType::Character,
        SyntaxType::Comment,
        SyntaxType::DocComment,
        SyntaxType::Identifier,
        SyntaxType::Keyword,
        SyntaxType::Lifetime,
        SyntaxType::Number,
        SyntaxType::String,
        SyntaxType::TypeIdentifier,
    ];

    fn identifier(self) -> &'static str {
        match self {
            SyntaxType::Attribute => "source.lang.rust.syntaxtype.attribute",
            SyntaxType::Character => "source.lang.rust.syntaxtype.character",
            SyntaxType::Comment => "source.lang.rust.syntaxtype.comment",
            SyntaxType::DocComment => "source.lang.rust.syntaxtype.doccomment",
            SyntaxType::Identifier => "source.lang.rust.syntaxtype.identifier",
            SyntaxType::Keyword => "source.lang.rust.syntaxtype.keyword",
            SyntaxType::Lifetime => "source.lang.rust.syntaxtype.lifetime",
            SyntaxType::Number => "source.lang.rust.syntaxtype.number",
            SyntaxType::String => "source.lang.rust.syntaxtype.string",
            SyntaxType::TypeIdentifier => "source.lang.rust.syntaxtype.typeidentifier",
        }
    }
}

impl From<Decl> for Kind {
    fn from(decl: Decl) -> Self {
        Kind::Decl(decl)
    }
}

impl From<Expr> for Kind {
    fn from(expr: Expr) -> Self {
        Kind::Expr(Some(expr))
    }
}

impl From<Stmt> for Kind {
    fn from(stmt: Stmt) -> Self {
        Kind::Stmt(Some(stmt))
    }
}

impl From<SyntaxType> for Kind {
    fn from(syntax: SyntaxType) -> Self {
        Kind::Syntax(syntax)
    }
}

impl From<String> for Kind {
    fn from(raw: String) -> Self {
        match registry::decode(&raw) {
            Some(kind) => kind,
            None => Kind::Unknown(raw),
        }
    }
}

impl From<&str> for Kind {
    fn from(raw: &str) -> Self {
        Kind::decode(raw)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Unknown(raw) => raw,
            known => known.encode().to_string(),
        }
    }
}

impl FromStr for Kind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Kind::decode(s))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode())
    }
}
