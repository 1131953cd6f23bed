use crate::query::{Predicate, TokenQuery};
use crate::source::Token;

impl<'d> TokenQuery<'d> {
    /// The selected token furthest into the file.
    fn anchor(&self) -> Option<Token<'d>> {
        self.iter().max_by_key(|token| token.sequence_index())
    }

    /// The first token after the selection, in the whole digest.
    pub fn next(&self) -> Self {
        self.next_of(Predicate::any())
    }

    /// The first token after the selection that matches `predicate`.
    pub fn next_of(&self, predicate: impl Into<Predicate<Token<'d>>>) -> Self {
        let predicate = predicate.into();
        let found = self.anchor().and_then(|anchor| {
            self.digest()
                .tokens()
                .skip(anchor.sequence_index() + 1)
                .find(|token| predicate.matches(token))
        });
        self.query(found)
    }

    pub fn next_where(&self, filter: impl Fn(&Token<'d>) -> bool + Send + Sync + 'static) -> Self {
        self.next_of(Predicate::from_filter(filter))
    }

    /// The nearest token before the selection's anchor.
    pub fn previous(&self) -> Self {
        self.previous_of(Predicate::any())
    }

    /// The nearest token before the selection's anchor that matches
    /// `predicate`.
    pub fn previous_of(&self, predicate: impl Into<Predicate<Token<'d>>>) -> Self {
        let predicate = predicate.into();
        let found = self.anchor().and_then(|anchor| {
            self.digest()
                .tokens()
                .take(anchor.sequence_index())
                .rev()
                .find(|token| predicate.matches(token))
        });
        self.query(found)
    }

    pub fn previous_where(
        &self,
        filter: impl Fn(&Token<'d>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.previous_of(Predicate::from_filter(filter))
    }
}
