use super::parse;
use slang::kind::{Decl, Function, Kind};
use slang::query::{Predicate, QueryError, RegexOptions};
use slang::source::{Digest, File};
use slang::Slice;

#[test]
fn capture_groups_select_sub_matches() {
    let digest = Digest::plain(File::new(
        "import Foo\nlet bar: Int = 123\nlet baz: String = \"...\"",
    ));
    let found = digest.query().fragment().subfragments("(let ba.)").unwrap();
    assert_eq!(found.contents(), vec!["let bar", "let baz"]);

    for fragment in &found {
        assert_eq!(&digest.text()[fragment.range()], fragment.contents());
    }
}

#[test]
fn group_count_per_match() {
    let digest = Digest::plain(File::new("k1=v1; k2=v2; k3"));
    let pairs = digest
        .query()
        .fragment()
        .subfragments(r"(k\d)(?:=(v\d))?")
        .unwrap();
    // Two groups for the first two matches, one for the last.
    assert_eq!(pairs.contents(), vec!["k1", "v1", "k2", "v2", "k3"]);
}

#[test]
fn fragments_of_parsed_nodes() {
    let digest = parse(
        "fn first() { let alpha = 1; }\nfn second() { let beta = 2; let gamma = 3; }\n",
    );
    let bodies = digest
        .query()
        .tree()
        .children_of(Kind::Decl(Decl::Function(Function::Free)))
        .fragments();
    assert_eq!(bodies.len(), 2);

    let bindings = bodies.subfragments(r"let (\w+)").unwrap();
    assert_eq!(bindings.contents(), vec!["alpha", "beta", "gamma"]);

    let second = bodies.last().subfragments(r"let (\w+)").unwrap();
    assert_eq!(second.contents(), vec!["beta", "gamma"]);
}

#[test]
fn options_and_predicates() {
    let digest = Digest::plain(File::new("Alpha alpha ALPHA"));
    let fragment = digest.query().fragment();

    assert_eq!(fragment.subfragments("alpha").unwrap().len(), 3);

    let exact = fragment
        .subfragments_with_options("alpha", RegexOptions::case_sensitive(), Predicate::any())
        .unwrap();
    assert_eq!(exact.one().map(|f| f.start()), Some(6));

    let shouting = fragment
        .subfragments_of(r"\w+", Predicate::pattern("^[A-Z]+$").unwrap().filter(|f| f.len() == 5))
        .unwrap();
    // Case-insensitive by default, so the predicate pattern matches all three.
    assert_eq!(shouting.len(), 3);

    let first_word = fragment.subfragments(r"\w+").unwrap().first_of(
        Predicate::pattern("^alpha$").unwrap().filter(|f| f.start() > 0),
    );
    assert_eq!(first_word.contents(), vec!["alpha"]);
}

#[test]
fn line_anchors_are_multi_line() {
    let digest = Digest::plain(File::new("one\ntwo\nthree"));
    let starts = digest.query().fragment().subfragments("^t").unwrap();
    assert_eq!(starts.len(), 2);
    let lines: Vec<_> = starts
        .iter()
        .map(|f| f.lines().first().map(|l| l.index()))
        .collect();
    assert_eq!(lines, vec![Some(1), Some(2)]);
}

#[test]
fn invalid_patterns_are_errors() {
    let digest = Digest::plain(File::new("text"));
    assert!(matches!(
        digest.query().fragment().subfragments("(unclosed"),
        Err(QueryError::InvalidPattern(_))
    ));
    assert!(Predicate::pattern("[").is_err());
}
