use crate::kind::Kind;
use crate::source::{Fragment, Node, Slice, Token};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Items that can be tested against a domain-specific matcher.
pub trait Matchable {
    type Matcher: Clone + fmt::Debug + Send + Sync;

    fn satisfies(&self, matcher: &Self::Matcher) -> bool;
}

impl Matchable for Token<'_> {
    type Matcher = Kind;

    fn satisfies(&self, kind: &Kind) -> bool {
        self.kind() == kind
    }
}

impl Matchable for Node<'_> {
    type Matcher = Kind;

    fn satisfies(&self, kind: &Kind) -> bool {
        self.kind() == kind
    }
}

impl Matchable for Fragment<'_> {
    type Matcher = Regex;

    fn satisfies(&self, regex: &Regex) -> bool {
        regex.is_match(self.contents())
    }
}

type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// An optional custom filter combined with an optional matcher.
///
/// Both parts must pass; a missing part passes. The empty predicate
/// matches everything. Builders return modified copies.
pub struct Predicate<T: Matchable> {
    filter: Option<Filter<T>>,
    matcher: Option<T::Matcher>,
}

impl<T: Matchable> Predicate<T> {
    /// Matches every item.
    pub fn any() -> Self {
        Self {
            filter: None,
            matcher: None,
        }
    }

    pub fn from_matcher(matcher: T::Matcher) -> Self {
        Self {
            filter: None,
            matcher: Some(matcher),
        }
    }

    pub fn from_filter(filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            filter: Some(Arc::new(filter)),
            matcher: None,
        }
    }

    /// Copy with `filter` replacing the custom filter.
    pub fn filter(&self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            filter: Some(Arc::new(filter)),
            matcher: self.matcher.clone(),
        }
    }

    /// Copy with `matcher` replacing the matcher.
    pub fn matching(&self, matcher: T::Matcher) -> Self {
        Self {
            filter: self.filter.clone(),
            matcher: Some(matcher),
        }
    }

    pub fn matcher(&self) -> Option<&T::Matcher> {
        self.matcher.as_ref()
    }

    pub fn matches(&self, item: &T) -> bool {
        self.filter.as_ref().map_or(true, |f| f(item))
            && self.matcher.as_ref().map_or(true, |m| item.satisfies(m))
    }
}

impl<T: Matchable> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            matcher: self.matcher.clone(),
        }
    }
}

impl<T: Matchable> Default for Predicate<T> {
    fn default() -> Self {
        Self::any()
    }
}

impl<T: Matchable> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("matcher", &self.matcher)
            .finish()
    }
}

impl<T: Matchable> From<&Predicate<T>> for Predicate<T> {
    fn from(predicate: &Predicate<T>) -> Self {
        predicate.clone()
    }
}

impl From<Kind> for Predicate<Token<'_>> {
    fn from(kind: Kind) -> Self {
        Self::from_matcher(kind)
    }
}

impl From<Kind> for Predicate<Node<'_>> {
    fn from(kind: Kind) -> Self {
        Self::from_matcher(kind)
    }
}

impl From<Regex> for Predicate<Fragment<'_>> {
    fn from(regex: Regex) -> Self {
        Self::from_matcher(regex)
    }
}
