use crate::kind::Kind;
use crate::source::{Digest, Slice, TokenId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A classified token in its digest's flat stream.
#[derive(Clone, Copy)]
pub struct Token<'d> {
    digest: &'d Digest,
    id: TokenId,
}

impl<'d> Token<'d> {
    pub(crate) fn new(digest: &'d Digest, id: TokenId) -> Self {
        Self { digest, id }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Position in the file's token stream.
    pub fn sequence_index(&self) -> usize {
        self.id.index()
    }

    pub fn kind(&self) -> &'d Kind {
        &self.digest.token_data(self.id).kind
    }
}

impl<'d> Slice<'d> for Token<'d> {
    fn digest(&self) -> &'d Digest {
        self.digest
    }

    fn range(&self) -> Range<usize> {
        self.digest.token_data(self.id).range.clone()
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.digest.id() == other.digest.id() && self.id == other.id
    }
}

impl Eq for Token<'_> {}

impl Hash for Token<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.id().hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(#{} {} {:?})",
            self.sequence_index(),
            self.kind(),
            self.contents()
        )
    }
}
