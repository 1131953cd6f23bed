use super::parse;
use proptest::prelude::*;
use slang::kind::{Decl, Function, Kind, Method};
use slang::config::load_json_from_str;
use slang::{applying, applying_disjoint, check_disjoint, Edit, EditError, Slice};

const SAMPLE: &str = r#"struct Foo {
    bar: Option<String>,
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

#[test]
fn edits_from_one_digest_apply_together() {
    let original = "Hello Alice Brown";
    let digest = slang::Digest::plain(slang::File::new(original));
    let words = digest.query().fragment().subfragments(r"(\w+) (\w+) (\w+)").unwrap();
    let all = words.all();

    let edits = vec![
        Edit::of_slice(&all[0], "Bye"),
        Edit::insert(all[1].end(), " Maria"),
        Edit::of_slice(&all[2], "Wu"),
    ];
    assert_eq!(applying(original, &edits).unwrap(), "Bye Alice Maria Wu");

    let mut reversed = edits.clone();
    reversed.reverse();
    assert_eq!(applying(original, &reversed).unwrap(), "Bye Alice Maria Wu");
}

#[test]
fn renaming_a_type_everywhere() {
    let digest = parse(SAMPLE);
    let edits: Vec<Edit> = digest
        .query()
        .tokens()
        .select_where(|t| t.contents() == "Foo")
        .iter()
        .map(|t| Edit::of_slice(&t, "Bar"))
        .collect();
    assert_eq!(edits.len(), 3);

    let renamed = applying_disjoint(digest.text(), &edits).unwrap();
    assert_eq!(renamed, SAMPLE.replace("Foo", "Bar"));

    let reparsed = parse(&renamed);
    let names: Vec<_> = reparsed
        .query()
        .tree()
        .children()
        .iter()
        .filter_map(|n| n.name())
        .collect();
    assert_eq!(names, vec!["Bar", "Bar"]);
}

#[test]
fn removing_a_method() {
    let digest = parse(SAMPLE);
    let constructor = digest
        .query()
        .tree()
        .descendants_of(Kind::Decl(Decl::Function(Function::Method(Method::Static))));
    assert_eq!(constructor.len(), 1);

    let edits: Vec<Edit> = constructor
        .iter()
        .map(|node| Edit::remove(node.range()))
        .collect();
    let trimmed = applying_disjoint(digest.text(), &edits).unwrap();
    assert!(!trimmed.contains("fn new"));

    let reparsed = parse(&trimmed);
    let methods = reparsed.query().tree().descendants_where(|n| {
        matches!(n.kind(), Kind::Decl(Decl::Function(Function::Method(_))))
    });
    assert_eq!(methods.len(), 1);
    assert_eq!(methods.one().and_then(|n| n.name()), Some("bar"));
}

#[test]
fn edits_from_different_queries_conflict() {
    let digest = parse(SAMPLE);
    let field = digest
        .query()
        .tree()
        .descendants_of(Kind::Decl(Decl::Field))
        .one()
        .unwrap();
    let field_type = digest
        .query()
        .tokens()
        .select_where(|t| t.contents() == "Option")
        .first()
        .one()
        .unwrap();

    let edits = vec![
        Edit::remove(field.range()),
        Edit::of_slice(&field_type, "Vec"),
    ];
    assert!(matches!(
        check_disjoint(&edits),
        Err(EditError::Overlapping { .. })
    ));
    assert!(applying_disjoint(digest.text(), &edits).is_err());
}

#[test]
fn plans_built_from_queries() {
    let digest = parse(SAMPLE);
    let edits: Vec<Edit> = digest
        .query()
        .tokens()
        .select_where(|t| t.contents() == "String")
        .iter()
        .map(|t| Edit::of_slice(&t, "Box<str>"))
        .collect();
    let json = serde_json::json!({
        "meta": { "name": "box-strings" },
        "edits": edits,
    });

    let plan = load_json_from_str(&json.to_string()).unwrap();
    assert_eq!(plan.meta.name, "box-strings");
    let rewritten = plan.apply_to(digest.text()).unwrap();
    assert_eq!(rewritten, SAMPLE.replace("String", "Box<str>"));
}

const TEXT: &str = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz\
abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz\
abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz";

/// Edits laid out left to right. An edit may touch the end of a non-empty
/// span before it; after an insert there is always a gap, so no two share a
/// start.
fn disjoint_edits() -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec((0usize..5, 1usize..4, 0u8..3, "[A-Z]{0,3}"), 0..20).prop_map(|specs| {
        let mut cursor = 0;
        let mut after_empty = false;
        let mut edits = Vec::with_capacity(specs.len());
        for (gap, len, op, text) in specs {
            let start = cursor + if after_empty { gap.max(1) } else { gap };
            let edit = match op {
                0 => Edit::insert(start, text),
                1 => Edit::replace(start..start + len, text),
                _ => Edit::remove(start..start + len),
            };
            let span = edit.span();
            cursor = span.end;
            after_empty = span.is_empty();
            edits.push(edit);
        }
        edits
    })
}

#[test]
fn touching_edits_are_disjoint() {
    let edits = vec![
        Edit::replace(2..4, "X"),
        Edit::remove(4..6),
        Edit::insert(6, "Y"),
    ];
    assert!(check_disjoint(&edits).is_ok());
    assert_eq!(applying_disjoint("abcdefgh", &edits).unwrap(), "abXYgh");
}

proptest! {
    #[test]
    fn disjoint_edits_apply_in_any_order(
        (edits, shuffled) in disjoint_edits()
            .prop_flat_map(|edits| (Just(edits.clone()), Just(edits).prop_shuffle()))
    ) {
        prop_assert!(check_disjoint(&shuffled).is_ok());
        let expected = applying(TEXT, &edits).unwrap();
        prop_assert_eq!(applying_disjoint(TEXT, &shuffled).unwrap(), expected);
    }

    #[test]
    fn removals_shrink_by_their_span(edits in disjoint_edits()) {
        let removals: Vec<Edit> = edits
            .iter()
            .map(|edit| Edit::remove(edit.span()))
            .collect();
        let removed: usize = removals.iter().map(|edit| edit.span().len()).sum();
        let result = applying(TEXT, &removals).unwrap();
        prop_assert_eq!(result.len(), TEXT.len() - removed);
    }
}
