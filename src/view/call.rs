use crate::kind::{Expr, Kind};
use crate::source::{Fragment, Node, Slice};
use crate::view::NodeView;
use std::fmt;

/// A call expression and its arguments.
#[derive(Debug, Clone)]
pub struct FunctionCall<'d> {
    node: Node<'d>,
    arguments: Vec<Argument<'d>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument<'d> {
    pub index: usize,
    pub name: Option<&'d str>,
    pub value: Fragment<'d>,
}

impl<'d> FunctionCall<'d> {
    /// The callee, as recorded on the node.
    pub fn name(&self) -> Option<&'d str> {
        self.node.name()
    }

    pub fn arguments(&self) -> &[Argument<'d>] {
        &self.arguments
    }
}

impl<'d> NodeView<'d> for FunctionCall<'d> {
    fn from_node(node: Node<'d>) -> Option<Self> {
        if !matches!(
            node.kind(),
            Kind::Expr(Some(Expr::Call | Expr::MethodCall))
        ) {
            return None;
        }

        let mut arguments = Vec::with_capacity(node.child_count());
        if node.child_count() > 0 {
            for (index, child) in node.children().enumerate() {
                if child.kind() != &Kind::Expr(Some(Expr::Argument)) {
                    return None;
                }
                arguments.push(Argument {
                    index,
                    name: child.name(),
                    value: child.body().unwrap_or_else(|| child.fragment()),
                });
            }
        } else if let Some(body) = node.body().filter(|b| !b.is_empty()) {
            // Some parsers report a lone argument only through the body.
            arguments.push(Argument {
                index: 0,
                name: None,
                value: body,
            });
        }

        Some(Self { node, arguments })
    }

    fn node(&self) -> Node<'d> {
        self.node
    }
}

impl fmt::Display for FunctionCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name().unwrap_or("?"))?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if let Some(name) = argument.name {
                write!(f, "{name}: ")?;
            }
            write!(f, "{}", argument.value.contents())?;
        }
        write!(f, ")")
    }
}
