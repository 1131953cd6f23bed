use super::parse;
use slang::kind::{Decl, EnumMember, Expr, Function, Kind, Method};
use slang::query::Predicate;
use slang::Slice;

const SAMPLE: &str = r#"struct Foo {
    bar: Option<String>,
}

enum Level {
    Any,
    Minor,
    Major,
}

impl Foo {
    fn new() -> Self {
        Foo { bar: None }
    }

    fn bar(&self) -> Option<&String> {
        self.bar.as_ref()
    }
}
"#;

fn variant() -> Kind {
    Kind::Decl(Decl::Enum(Some(EnumMember::Variant)))
}

#[test]
fn root_spans_the_file() {
    let digest = parse(SAMPLE);
    let tree = digest.query().tree();
    assert_eq!(tree.len(), 1);

    let root = tree.one().unwrap();
    assert_eq!(root.kind(), &Kind::SourceFile);
    assert_eq!(root.range(), 0..SAMPLE.len());
}

#[test]
fn descendants_and_children() {
    let digest = parse(SAMPLE);
    let tree = digest.query().tree();

    assert_eq!(tree.descendants().len(), 12);
    assert_eq!(tree.children().len(), 3);
    assert_eq!(
        tree.children(),
        tree.descendants_within(Predicate::any(), Some(1))
    );

    let names: Vec<_> = tree.children().iter().filter_map(|n| n.name()).collect();
    assert_eq!(names, vec!["Foo", "Level", "Foo"]);
}

#[test]
fn filtered_descendants_are_a_subset() {
    let digest = parse(SAMPLE);
    let tree = digest.query().tree();
    let all = tree.descendants();

    for kind in [variant(), Kind::Decl(Decl::Field), Kind::Expr(Some(Expr::Struct))] {
        let some = tree.descendants_of(kind);
        assert!(!some.is_empty());
        assert!(some.iter().all(|n| all.all().contains(&n)));
    }
}

#[test]
fn depth_bounds_the_search() {
    let digest = parse(SAMPLE);
    let tree = digest.query().tree();

    assert_eq!(tree.descendants_of(variant()).len(), 3);
    assert!(tree.descendants_within(variant(), Some(1)).is_empty());
    assert_eq!(tree.descendants_within(variant(), Some(2)).len(), 3);
    assert!(tree.descendants_within(Predicate::any(), Some(0)).is_empty());

    let variants: Vec<_> = tree
        .children_of(Kind::Decl(Decl::Enum(None)))
        .children_of(variant())
        .iter()
        .filter_map(|n| n.name())
        .collect();
    assert_eq!(variants, vec!["Any", "Minor", "Major"]);
}

#[test]
fn first_and_last() {
    let digest = parse(SAMPLE);
    let descendants = digest.query().tree().descendants();

    assert_eq!(descendants.first().one().and_then(|n| n.name()), Some("Foo"));
    assert_eq!(descendants.last().one().and_then(|n| n.name()), Some("as_ref"));

    let methods = descendants.select_where(|n| {
        matches!(n.kind(), Kind::Decl(Decl::Function(Function::Method(_))))
    });
    assert_eq!(
        methods.last().one().map(|n| n.kind().clone()),
        Some(Kind::Decl(Decl::Function(Function::Method(Method::Instance))))
    );
    assert_eq!(
        methods
            .first_of(Kind::Decl(Decl::Function(Function::Method(Method::Static))))
            .one()
            .and_then(|n| n.name()),
        Some("new")
    );
}

#[test]
fn tokens_of_a_subtree() {
    let digest = parse(SAMPLE);
    let level = digest
        .query()
        .tree()
        .children_of(Kind::Decl(Decl::Enum(None)));

    let tokens = level.tokens();
    assert_eq!(tokens.first().contents(), vec!["enum"]);
    assert_eq!(tokens.last().contents(), vec!["Major"]);
    assert_eq!(tokens.contents(), vec!["enum", "Level", "Any", "Minor", "Major"]);
}

#[test]
fn any_of_several_kinds() {
    let digest = parse(SAMPLE);
    let tree = digest.query().tree();
    let found = tree.descendants_of_any(&[Kind::Decl(Decl::Field), variant()], None);
    let names: Vec<_> = found.iter().filter_map(|n| n.name()).collect();
    assert_eq!(names, vec!["bar", "Any", "Minor", "Major"]);

    assert_eq!(
        tree.children_of_any(&[Kind::Decl(Decl::Impl(None)), Kind::Decl(Decl::Struct)])
            .len(),
        2
    );
}

#[test]
fn bodies_are_inner_ranges() {
    let digest = parse(SAMPLE);
    let new = digest
        .query()
        .tree()
        .descendants_where(|n| n.name() == Some("new"))
        .one()
        .unwrap();
    let body = new.body().unwrap();
    assert_eq!(body.contents().trim(), "Foo { bar: None }");
}

#[test]
fn name_helpers_respect_kind() {
    let digest = parse(SAMPLE);
    let tree = digest.query().tree();

    // `new` takes no receiver, so it is not an instance method.
    let methods = tree.descendants_where(|n| n.method_name_starts_with(""));
    assert_eq!(methods.iter().filter_map(|n| n.name()).collect::<Vec<_>>(), vec!["bar"]);
    assert!(tree.descendants_where(|n| n.method_name_contains("ne")).is_empty());

    let calls = tree.descendants_where(|n| n.call_name_contains("ref"));
    assert_eq!(calls.one().map(|n| n.kind().clone()), Some(Kind::Expr(Some(Expr::MethodCall))));
}
