use crate::kind::Kind;
use crate::query::{FragmentQuery, TokenQuery, TreeQuery};
use crate::source::errors::DigestError;
use crate::source::file::File;
use crate::source::raw::{RawDigest, RawNode};
use crate::source::{Fragment, Line, Node, Token};
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DIGEST_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a [`Digest`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigestId(u64);

impl fmt::Display for DigestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digest#{}", self.0)
    }
}

/// Handle of a token inside its digest. Equal to the token's sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub(crate) u32);

/// Handle of a tree node inside its digest (pre-order position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub(crate) struct LineData {
    pub(crate) index: usize,
    pub(crate) range: Range<usize>,
}

#[derive(Debug)]
pub(crate) struct TokenData {
    pub(crate) range: Range<usize>,
    pub(crate) kind: Kind,
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) range: Range<usize>,
    pub(crate) kind: Kind,
    pub(crate) name: Option<String>,
    pub(crate) name_range: Option<Range<usize>>,
    pub(crate) body_range: Option<Range<usize>>,
    pub(crate) children: Vec<NodeId>,
}

/// Immutable parsed representation of one file: its lines, its flat token
/// stream and its syntax tree.
///
/// All ranges are validated once, here. Queries built from a digest trust
/// them afterwards.
pub struct Digest {
    id: DigestId,
    file: File,
    lines: Vec<LineData>,
    tokens: Vec<TokenData>,
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Digest {
    /// Validate `raw` against `file` and build the arena. Roots other than a
    /// single `SourceFile` node spanning the file are wrapped in one, so the
    /// tree always has exactly one root.
    pub fn new(file: File, raw: RawDigest) -> Result<Self, DigestError> {
        let text = file.contents();

        let mut lines = Vec::with_capacity(raw.lines.len());
        for line in raw.lines {
            check_range(text, "line", &line.range)?;
            lines.push(LineData {
                index: line.index,
                range: line.range,
            });
        }

        let mut tokens = Vec::with_capacity(raw.tokens.len());
        let mut previous_start = 0;
        for (index, token) in raw.tokens.into_iter().enumerate() {
            check_range(text, "token", &token.range)?;
            if token.range.start < previous_start {
                return Err(DigestError::UnorderedTokens {
                    index,
                    start: token.range.start,
                });
            }
            previous_start = token.range.start;
            tokens.push(TokenData {
                range: token.range,
                kind: Kind::from(token.kind),
            });
        }

        let mut nodes = Vec::new();
        let root = file_root(raw.roots, text.len());
        let roots = vec![flatten(text, root, &mut nodes)?];

        let id = DigestId(NEXT_DIGEST_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(
            %id,
            path = ?file.path(),
            checksum = file.checksum(),
            lines = lines.len(),
            tokens = tokens.len(),
            nodes = nodes.len(),
            "digest constructed"
        );

        Ok(Self {
            id,
            file,
            lines,
            tokens,
            nodes,
            roots,
        })
    }

    /// A digest with lines and a bare root only, for text without a parser.
    pub fn plain(file: File) -> Self {
        let raw = RawDigest::plain(file.contents());
        let id = DigestId(NEXT_DIGEST_ID.fetch_add(1, Ordering::Relaxed));
        let lines = raw
            .lines
            .into_iter()
            .map(|l| LineData {
                index: l.index,
                range: l.range,
            })
            .collect();
        let nodes = vec![NodeData {
            range: 0..file.len(),
            kind: Kind::SourceFile,
            name: None,
            name_range: None,
            body_range: None,
            children: Vec::new(),
        }];
        Self {
            id,
            file,
            lines,
            tokens: Vec::new(),
            nodes,
            roots: vec![NodeId(0)],
        }
    }

    pub fn id(&self) -> DigestId {
        self.id
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn text(&self) -> &str {
        self.file.contents()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = Line<'_>> + ExactSizeIterator + '_ {
        (0..self.lines.len()).map(move |i| Line::new(self, i))
    }

    /// All tokens in sequence order.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = Token<'_>> + ExactSizeIterator + '_ {
        (0..self.tokens.len()).map(move |i| Token::new(self, TokenId(i as u32)))
    }

    pub fn roots(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        self.roots.iter().map(move |id| Node::new(self, *id))
    }

    pub fn token(&self, sequence_index: usize) -> Option<Token<'_>> {
        (sequence_index < self.tokens.len()).then(|| Token::new(self, TokenId(sequence_index as u32)))
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then(|| Node::new(self, id))
    }

    /// Lines overlapping `range`.
    pub fn lines_in(&self, range: Range<usize>) -> Vec<Line<'_>> {
        self.lines()
            .filter(|line| overlaps(&range, &self.lines[line.position()].range))
            .collect()
    }

    /// Tokens overlapping `range`, in sequence order.
    pub fn tokens_in(&self, range: Range<usize>) -> Vec<Token<'_>> {
        self.tokens()
            .filter(|token| overlaps(&range, &self.token_data(token.id()).range))
            .collect()
    }

    /// Fragment over an absolute byte range, if it is valid for this file.
    pub fn fragment(&self, range: Range<usize>) -> Option<Fragment<'_>> {
        self.file.slice(range.clone())?;
        Some(Fragment::new(self, range))
    }

    /// Fragment spanning the whole file.
    pub fn whole(&self) -> Fragment<'_> {
        Fragment::new(self, 0..self.file.len())
    }

    /// Entry points for the three query families.
    pub fn query(&self) -> Queries<'_> {
        Queries { digest: self }
    }

    pub(crate) fn line_data(&self, position: usize) -> &LineData {
        &self.lines[position]
    }

    pub(crate) fn token_data(&self, id: TokenId) -> &TokenData {
        &self.tokens[id.index()]
    }

    pub(crate) fn node_data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digest")
            .field("id", &self.id)
            .field("path", &self.file.path())
            .field("len", &self.file.len())
            .field("lines", &self.lines.len())
            .field("tokens", &self.tokens.len())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Top-level selections over a digest.
#[derive(Clone, Copy)]
pub struct Queries<'d> {
    digest: &'d Digest,
}

impl<'d> Queries<'d> {
    /// The whole file as a single fragment.
    pub fn fragment(&self) -> FragmentQuery<'d> {
        FragmentQuery::new(self.digest, [self.digest.whole()])
    }

    /// Every token of the file.
    pub fn tokens(&self) -> TokenQuery<'d> {
        TokenQuery::new(self.digest, self.digest.tokens())
    }

    /// The tree roots.
    pub fn tree(&self) -> TreeQuery<'d> {
        TreeQuery::new(self.digest, self.digest.roots())
    }
}

/// Half-open interval intersection.
pub(crate) fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && a.end > b.start
}

fn check_range(text: &str, what: &'static str, range: &Range<usize>) -> Result<(), DigestError> {
    if range.start > range.end || range.end > text.len() {
        return Err(DigestError::InvalidRange {
            what,
            range: range.clone(),
            file_len: text.len(),
        });
    }
    if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
        return Err(DigestError::NotCharBoundary {
            what,
            range: range.clone(),
        });
    }
    Ok(())
}

/// The single root spanning the file: `roots` itself when it already is one,
/// otherwise a synthetic `SourceFile` node holding `roots` as children.
fn file_root(mut roots: Vec<RawNode>, len: usize) -> RawNode {
    let wraps_file = roots.len() == 1
        && roots[0].range == (0..len)
        && Kind::decode(&roots[0].kind) == Kind::SourceFile;
    match roots.pop() {
        Some(root) if wraps_file => root,
        popped => {
            roots.extend(popped);
            RawNode::new(0..len, Kind::SourceFile).with_children(roots)
        }
    }
}

/// Store `raw` and its subtree in pre-order, returning its handle.
fn flatten(text: &str, raw: RawNode, nodes: &mut Vec<NodeData>) -> Result<NodeId, DigestError> {
    check_range(text, "node", &raw.range)?;
    if let Some(range) = &raw.name_range {
        check_range(text, "node name", range)?;
    }
    if let Some(range) = &raw.body_range {
        check_range(text, "node body", range)?;
    }

    let id = NodeId(nodes.len() as u32);
    nodes.push(NodeData {
        range: raw.range,
        kind: Kind::from(raw.kind),
        name: raw.name,
        name_range: raw.name_range,
        body_range: raw.body_range,
        children: Vec::new(),
    });

    let mut children = Vec::with_capacity(raw.children.len());
    for child in raw.children {
        children.push(flatten(text, child, nodes)?);
    }
    nodes[id.index()].children = children;

    Ok(id)
}
