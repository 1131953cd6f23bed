use super::parse;
use slang::kind::{Kind, SyntaxType};
use slang::query::Predicate;
use slang::{Slice, Token};

const SAMPLE: &str = r#"use std::fmt;

const LIMIT: u32 = 123;
static mut NAME: &str = "slang";

// Plain comment.
struct Foo;

fn foo() -> Option<String> {
    return None;
}
"#;

fn syntax(kind: SyntaxType) -> Kind {
    Kind::Syntax(kind)
}

#[test]
fn stream_is_in_file_order() {
    let digest = parse(SAMPLE);
    let tokens = digest.query().tokens();
    assert!(tokens
        .all()
        .windows(2)
        .all(|w| w[0].range().start <= w[1].range().start));
    assert!(tokens
        .iter()
        .enumerate()
        .all(|(i, t)| t.sequence_index() == i));
}

#[test]
fn first_and_last_tokens() {
    let digest = parse(SAMPLE);
    let tokens = digest.query().tokens();

    assert_eq!(tokens.first().contents(), vec!["use"]);
    assert_eq!(
        tokens.first_of(syntax(SyntaxType::Identifier)).contents(),
        vec!["std"]
    );
    assert_eq!(tokens.last().contents(), vec!["None"]);
    assert_eq!(
        tokens.last_of(syntax(SyntaxType::Keyword)).contents(),
        vec!["return"]
    );
    assert_eq!(
        tokens.select(syntax(SyntaxType::Comment)).contents(),
        vec!["// Plain comment."]
    );
}

#[test]
fn next_and_previous() {
    let digest = parse(SAMPLE);
    let tokens = digest.query().tokens();
    let last = tokens.last();

    assert_eq!(last.previous().contents(), vec!["return"]);
    assert_eq!(
        last.previous_of(syntax(SyntaxType::Identifier)).contents(),
        vec!["foo"]
    );
    assert_eq!(
        tokens
            .first()
            .next_of(syntax(SyntaxType::Number))
            .contents(),
        vec!["123"]
    );
    assert_eq!(
        tokens
            .first()
            .next_where(|t| t.contents() == "NAME")
            .previous()
            .contents(),
        vec!["mut"]
    );
}

#[test]
fn next_then_previous_returns_home() {
    let digest = parse(SAMPLE);
    let tokens = digest.query().tokens();

    for i in 1..tokens.len() - 1 {
        let single = tokens.get(i);
        assert_eq!(single.next().previous(), single);
        assert_eq!(single.previous().next(), single);
    }
}

#[test]
fn ends_of_the_stream() {
    let digest = parse(SAMPLE);
    let tokens = digest.query().tokens();

    assert!(tokens.last().next().is_empty());
    assert!(tokens.first().previous().is_empty());
    assert!(tokens.select(syntax(SyntaxType::Lifetime)).next().is_empty());
}

#[test]
fn predicates_combine_filter_and_kind() {
    let digest = parse(SAMPLE);
    let tokens = digest.query().tokens();

    let identifier: Predicate<Token<'_>> = syntax(SyntaxType::Identifier).into();
    let upper = identifier.filter(|t| t.contents().chars().all(|c| c.is_ascii_uppercase()));
    assert_eq!(tokens.select(&upper).contents(), vec!["LIMIT", "NAME"]);

    let types = tokens.select(syntax(SyntaxType::TypeIdentifier)).contents();
    assert_eq!(types, vec!["u32", "str", "Foo", "Option", "String"]);
}

#[test]
fn tokens_of_lines() {
    let digest = parse(SAMPLE);
    let line = digest.lines().nth(2).unwrap();
    assert_eq!(line.contents(), "const LIMIT: u32 = 123;");

    let on_line: Vec<_> = line.tokens().iter().map(|t| t.contents()).collect();
    assert_eq!(on_line, vec!["const", "LIMIT", "u32", "123"]);
}
