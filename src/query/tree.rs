use crate::kind::Kind;
use crate::query::{Predicate, TokenQuery, TreeQuery};
use crate::source::{overlaps, Node, Slice};
use std::collections::BTreeSet;

impl<'d> TreeQuery<'d> {
    /// Every node below the selection, pre-order.
    pub fn descendants(&self) -> Self {
        self.descendants_within(Predicate::any(), None)
    }

    pub fn descendants_of(&self, predicate: impl Into<Predicate<Node<'d>>>) -> Self {
        self.descendants_within(predicate, None)
    }

    pub fn descendants_where(
        &self,
        filter: impl Fn(&Node<'d>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.descendants_within(Predicate::from_filter(filter), None)
    }

    /// Pre-order walk from the children of every selected node, at most
    /// `depth` levels down (`None` for no limit), filtered by `predicate`.
    /// `Some(1)` reaches direct children only and `Some(0)` yields nothing.
    ///
    /// The selected nodes themselves are never part of the result.
    pub fn descendants_within(
        &self,
        predicate: impl Into<Predicate<Node<'d>>>,
        depth: Option<usize>,
    ) -> Self {
        let predicate = predicate.into();
        let mut visited = Vec::new();
        for root in self.iter() {
            walk(root, depth, &mut visited);
        }
        self.query(visited.into_iter().filter(|node| predicate.matches(node)))
    }

    pub fn children(&self) -> Self {
        self.descendants_within(Predicate::any(), Some(1))
    }

    pub fn children_of(&self, predicate: impl Into<Predicate<Node<'d>>>) -> Self {
        self.descendants_within(predicate, Some(1))
    }

    pub fn children_where(&self, filter: impl Fn(&Node<'d>) -> bool + Send + Sync + 'static) -> Self {
        self.descendants_within(Predicate::from_filter(filter), Some(1))
    }

    /// Descendants of each kind in turn, concatenated in `kinds` order.
    pub fn descendants_of_any(&self, kinds: &[Kind], depth: Option<usize>) -> Self {
        let found: Vec<_> = kinds
            .iter()
            .flat_map(|kind| self.descendants_within(kind.clone(), depth))
            .collect();
        self.query(found)
    }

    pub fn children_of_any(&self, kinds: &[Kind]) -> Self {
        self.descendants_of_any(kinds, Some(1))
    }

    /// Tokens overlapping any selected node, in sequence order.
    #[doc(alias = "syntax")]
    pub fn tokens(&self) -> TokenQuery<'d> {
        let digest = self.digest();
        let mut indices = BTreeSet::new();
        for node in self.iter() {
            let range = node.range();
            indices.extend(
                digest
                    .tokens()
                    .filter(|token| overlaps(&range, &token.range()))
                    .map(|token| token.sequence_index()),
            );
        }
        TokenQuery::new(digest, indices.into_iter().filter_map(|i| digest.token(i)))
    }
}

fn walk<'d>(root: Node<'d>, depth: Option<usize>, visited: &mut Vec<Node<'d>>) {
    if depth == Some(0) {
        return;
    }
    let mut stack: Vec<(Node<'d>, usize)> = root.children().rev().map(|c| (c, 1)).collect();
    while let Some((node, level)) = stack.pop() {
        visited.push(node);
        if depth.map_or(true, |limit| level < limit) {
            stack.extend(node.children().rev().map(|c| (c, level + 1)));
        }
    }
}
