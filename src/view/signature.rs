use crate::kind::{Kind, SyntaxType};
use crate::source::Slice;
use crate::view::{Argument, FunctionCall};

/// How a parameter constrains an argument's name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameMatch {
    #[default]
    Any,
    Named(String),
    Unnamed,
}

impl NameMatch {
    fn matches(&self, name: Option<&str>) -> bool {
        match self {
            NameMatch::Any => true,
            NameMatch::Named(expected) => name == Some(expected.as_str()),
            NameMatch::Unnamed => name.is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter {
    pub name: NameMatch,
    /// When set, the argument must be exactly one token of this kind.
    pub syntax: Option<SyntaxType>,
}

impl Parameter {
    pub fn matches(&self, argument: &Argument<'_>) -> bool {
        if !self.name.matches(argument.name) {
            return false;
        }
        let Some(syntax) = self.syntax else {
            return true;
        };
        match argument.value.tokens().as_slice() {
            [token] => token.kind() == &Kind::Syntax(syntax),
            _ => false,
        }
    }
}

/// Expected shape of a call's argument list.
///
/// ```
/// use slang::kind::SyntaxType;
/// use slang::view::FunctionSignature;
///
/// let signature = FunctionSignature::new()
///     .unnamed(SyntaxType::String)
///     .any();
/// assert_eq!(signature.parameters().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionSignature {
    parameters: Vec<Parameter>,
}

impl FunctionSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn with(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Any argument at all.
    pub fn any(self) -> Self {
        self.with(Parameter::default())
    }

    /// Any argument, named or not, that is one token of `syntax`.
    pub fn any_of(self, syntax: SyntaxType) -> Self {
        self.with(Parameter {
            name: NameMatch::Any,
            syntax: Some(syntax),
        })
    }

    pub fn named(self, name: impl Into<String>, syntax: SyntaxType) -> Self {
        self.with(Parameter {
            name: NameMatch::Named(name.into()),
            syntax: Some(syntax),
        })
    }

    pub fn unnamed(self, syntax: SyntaxType) -> Self {
        self.with(Parameter {
            name: NameMatch::Unnamed,
            syntax: Some(syntax),
        })
    }

    /// Equal arity and every parameter matching its argument.
    pub fn matches(&self, call: &FunctionCall<'_>) -> bool {
        let arguments = call.arguments();
        arguments.len() == self.parameters.len()
            && self
                .parameters
                .iter()
                .zip(arguments)
                .all(|(parameter, argument)| parameter.matches(argument))
    }
}
