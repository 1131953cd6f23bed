//! Progressive selections over a digest.
//!
//! Every query step takes a [`Selection`] and returns a new one bound to the
//! same digest. Fragment, token and tree selections add their own steps on
//! top of the universal ones defined here.

pub mod errors;
mod fragment;
pub mod predicate;
mod token;
mod tree;

pub use errors::QueryError;
pub use fragment::RegexOptions;
pub use predicate::{Matchable, Predicate};

use crate::source::{Digest, Fragment, Node, Slice, Token};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

pub type FragmentQuery<'d> = Selection<'d, Fragment<'d>>;
pub type TokenQuery<'d> = Selection<'d, Token<'d>>;
pub type TreeQuery<'d> = Selection<'d, Node<'d>>;

/// An ordered, duplicate-free list of items from one digest.
#[derive(Clone)]
pub struct Selection<'d, T> {
    digest: &'d Digest,
    items: Vec<T>,
}

impl<'d, T: Copy + Eq + Hash> Selection<'d, T> {
    /// Keeps the first occurrence of every item, in order.
    pub fn new(digest: &'d Digest, items: impl IntoIterator<Item = T>) -> Self {
        let mut seen = HashSet::new();
        let items = items.into_iter().filter(|item| seen.insert(*item)).collect();
        Self { digest, items }
    }

    pub fn empty(digest: &'d Digest) -> Self {
        Self {
            digest,
            items: Vec::new(),
        }
    }

    pub fn digest(&self) -> &'d Digest {
        self.digest
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn one(&self) -> Option<T> {
        self.items.first().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.items.iter().copied()
    }

    /// A new selection of the same digest.
    pub fn query(&self, items: impl IntoIterator<Item = T>) -> Self {
        Self::new(self.digest, items)
    }

    /// Singleton of the `index`-th item; empty when out of range.
    pub fn get(&self, index: usize) -> Self {
        self.query(self.items.get(index).copied())
    }

    /// Each item as its own singleton selection.
    pub fn singles(&self) -> impl Iterator<Item = Self> + '_ {
        self.items.iter().map(|item| self.query([*item]))
    }

    /// Run `f` on every singleton and concatenate the results.
    pub fn flat_map<U, F>(&self, mut f: F) -> Result<Selection<'d, U>, QueryError>
    where
        U: Copy + Eq + Hash,
        F: FnMut(Self) -> Selection<'d, U>,
    {
        self.singles()
            .try_fold(Selection::empty(self.digest), |acc, single| acc.merge(&f(single)))
    }

    /// Items of `self` followed by those of `other`, deduplicated.
    pub fn merge(&self, other: &Self) -> Result<Self, QueryError> {
        if self.digest.id() != other.digest.id() {
            return Err(QueryError::ForeignDigest {
                left: self.digest.id(),
                right: other.digest.id(),
            });
        }
        Ok(self.query(self.iter().chain(other.iter())))
    }
}

impl<'d, T: Matchable + Copy + Eq + Hash> Selection<'d, T> {
    pub fn select(&self, predicate: impl Into<Predicate<T>>) -> Self {
        let predicate = predicate.into();
        self.query(self.iter().filter(|item| predicate.matches(item)))
    }

    pub fn select_where(&self, filter: impl Fn(&T) -> bool) -> Self {
        self.query(self.iter().filter(|item| filter(item)))
    }

    pub fn first(&self) -> Self {
        self.get(0)
    }

    pub fn first_of(&self, predicate: impl Into<Predicate<T>>) -> Self {
        let predicate = predicate.into();
        self.query(self.iter().find(|item| predicate.matches(item)))
    }

    pub fn first_where(&self, filter: impl Fn(&T) -> bool) -> Self {
        self.query(self.iter().find(|item| filter(item)))
    }

    pub fn last(&self) -> Self {
        self.query(self.items.last().copied())
    }

    pub fn last_of(&self, predicate: impl Into<Predicate<T>>) -> Self {
        let predicate = predicate.into();
        self.query(self.iter().rev().find(|item| predicate.matches(item)))
    }

    pub fn last_where(&self, filter: impl Fn(&T) -> bool) -> Self {
        self.query(self.iter().rev().find(|item| filter(item)))
    }
}

impl<'d, T: Slice<'d> + Eq + Hash> Selection<'d, T> {
    /// Each item as a fragment over its range.
    pub fn fragments(&self) -> FragmentQuery<'d> {
        FragmentQuery::new(self.digest, self.iter().map(|item| item.fragment()))
    }

    /// Text of every item, in order.
    pub fn contents(&self) -> Vec<&'d str> {
        self.iter().map(|item| item.contents()).collect()
    }
}

impl<T: PartialEq> PartialEq for Selection<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.digest.id() == other.digest.id() && self.items == other.items
    }
}

impl<T: Eq> Eq for Selection<'_, T> {}

impl<T: Hash> Hash for Selection<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.id().hash(state);
        self.items.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Selection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("digest", &self.digest.id())
            .field("items", &self.items)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Selection<'_, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Selection<'_, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
