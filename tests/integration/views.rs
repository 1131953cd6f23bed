use super::parse;
use slang::kind::{Decl, Expr, Function, Kind, SyntaxType};
use slang::view::{FunctionCall, FunctionSignature};
use slang::Slice;

const SAMPLE: &str = r#"fn main() {
    log("ready", 3);
    point(x, y + 1);
    values.push(1);
    outer(inner(2));
}
"#;

fn calls(digest: &slang::Digest) -> Vec<FunctionCall<'_>> {
    digest
        .query()
        .tree()
        .descendants_of_any(&[Kind::Expr(Some(Expr::Call)), Kind::Expr(Some(Expr::MethodCall))], None)
        .iter()
        .filter_map(|node| node.view::<FunctionCall>())
        .collect()
}

#[test]
fn every_call_has_a_view_grouped_by_kind() {
    let digest = parse(SAMPLE);
    let rendered: Vec<_> = calls(&digest).iter().map(|c| c.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "log(\"ready\", 3)",
            "point(x, y + 1)",
            "outer(inner(2))",
            "inner(2)",
            "push(1)",
        ]
    );
}

#[test]
fn arguments_are_positional() {
    let digest = parse(SAMPLE);
    let all = calls(&digest);
    let log = &all[0];

    assert_eq!(log.name(), Some("log"));
    let arguments: Vec<_> = log
        .arguments()
        .iter()
        .map(|a| (a.index, a.name, a.value.contents()))
        .collect();
    assert_eq!(arguments, vec![(0, None, "\"ready\""), (1, None, "3")]);
}

#[test]
fn signatures_check_arity_and_shape() {
    let digest = parse(SAMPLE);
    let all = calls(&digest);
    let (log, point) = (&all[0], &all[1]);

    let logging = FunctionSignature::new()
        .unnamed(SyntaxType::String)
        .unnamed(SyntaxType::Number);
    assert!(logging.matches(log));
    assert!(!logging.matches(point));

    assert!(FunctionSignature::new().any().any().matches(point));
    assert!(FunctionSignature::new()
        .any_of(SyntaxType::Identifier)
        .any()
        .matches(point));
    // `y + 1` is more than one token.
    assert!(!FunctionSignature::new()
        .any_of(SyntaxType::Identifier)
        .any_of(SyntaxType::Identifier)
        .matches(point));
    assert!(!FunctionSignature::new().any().matches(point));
    assert!(!FunctionSignature::new()
        .named("message", SyntaxType::String)
        .any()
        .matches(log));
}

#[test]
fn calls_matching_a_signature() {
    let digest = parse(SAMPLE);
    let single_number = FunctionSignature::new().unnamed(SyntaxType::Number);
    let names: Vec<_> = calls(&digest)
        .iter()
        .filter(|call| single_number.matches(call))
        .filter_map(|call| call.name())
        .collect();
    assert_eq!(names, vec!["inner", "push"]);
}

#[test]
fn other_nodes_have_no_call_view() {
    let digest = parse(SAMPLE);
    let main = digest
        .query()
        .tree()
        .children_of(Kind::Decl(Decl::Function(Function::Free)))
        .one()
        .unwrap();
    assert!(main.view::<FunctionCall>().is_none());
}
