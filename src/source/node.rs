use crate::kind::{Decl, Expr, Function, Kind, Method};
use crate::source::{Digest, Fragment, NodeId, Slice};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A node of a digest's syntax tree.
#[derive(Clone, Copy)]
pub struct Node<'d> {
    digest: &'d Digest,
    id: NodeId,
}

impl<'d> Node<'d> {
    pub(crate) fn new(digest: &'d Digest, id: NodeId) -> Self {
        Self { digest, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'d Kind {
        &self.digest.node_data(self.id).kind
    }

    pub fn name(&self) -> Option<&'d str> {
        self.digest.node_data(self.id).name.as_deref()
    }

    pub fn name_range(&self) -> Option<Range<usize>> {
        self.digest.node_data(self.id).name_range.clone()
    }

    pub fn body_range(&self) -> Option<Range<usize>> {
        self.digest.node_data(self.id).body_range.clone()
    }

    /// The body as a fragment, for nodes that have one.
    pub fn body(&self) -> Option<Fragment<'d>> {
        self.body_range().map(|range| Fragment::new(self.digest, range))
    }

    pub fn child_count(&self) -> usize {
        self.digest.node_data(self.id).children.len()
    }

    pub fn children(&self) -> Children<'d> {
        Children {
            digest: self.digest,
            ids: self.digest.node_data(self.id).children.iter(),
        }
    }
}

impl<'d> Node<'d> {
    fn name_where(&self, kinds: &[Kind], test: impl Fn(&str) -> bool) -> bool {
        kinds.contains(self.kind()) && self.name().is_some_and(test)
    }

    /// An instance method whose name starts with `prefix`.
    pub fn method_name_starts_with(&self, prefix: &str) -> bool {
        self.name_where(&[INSTANCE_METHOD], |name| name.starts_with(prefix))
    }

    pub fn method_name_contains(&self, needle: &str) -> bool {
        self.name_where(&[INSTANCE_METHOD], |name| name.contains(needle))
    }

    /// A call or method call whose callee name contains `needle`.
    pub fn call_name_contains(&self, needle: &str) -> bool {
        self.name_where(
            &[Kind::Expr(Some(Expr::Call)), Kind::Expr(Some(Expr::MethodCall))],
            |name| name.contains(needle),
        )
    }

    /// A named argument whose label contains `needle`.
    pub fn argument_name_contains(&self, needle: &str) -> bool {
        self.name_where(&[Kind::Expr(Some(Expr::Argument))], |name| {
            name.contains(needle)
        })
    }
}

const INSTANCE_METHOD: Kind = Kind::Decl(Decl::Function(Function::Method(Method::Instance)));

/// Iterator over a node's direct children, in source order.
pub struct Children<'d> {
    digest: &'d Digest,
    ids: std::slice::Iter<'d, NodeId>,
}

impl<'d> Iterator for Children<'d> {
    type Item = Node<'d>;

    fn next(&mut self) -> Option<Node<'d>> {
        self.ids.next().map(|id| Node::new(self.digest, *id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| Node::new(self.digest, *id))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl<'d> Slice<'d> for Node<'d> {
    fn digest(&self) -> &'d Digest {
        self.digest
    }

    fn range(&self) -> Range<usize> {
        self.digest.node_data(self.id).range.clone()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.digest.id() == other.digest.id() && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.id().hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("kind", &self.kind().encode());
        if let Some(name) = self.name() {
            s.field("name", &name);
        }
        s.field("range", &self.range())
            .field("children", &self.child_count())
            .finish()
    }
}
