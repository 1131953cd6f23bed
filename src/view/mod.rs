//! Typed interpretations of tree nodes.

mod call;
mod signature;

pub use call::{Argument, FunctionCall};
pub use signature::{FunctionSignature, NameMatch, Parameter};

use crate::source::Node;

/// A typed view constructed from a node of the right shape.
pub trait NodeView<'d>: Sized {
    fn from_node(node: Node<'d>) -> Option<Self>;

    fn node(&self) -> Node<'d>;
}

impl<'d> Node<'d> {
    /// Interpret this node as `T`, if it has the right shape.
    pub fn view<T: NodeView<'d>>(&self) -> Option<T> {
        T::from_node(*self)
    }
}
