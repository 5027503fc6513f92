use pretty_assertions::assert_eq;

use super::*;
use crate::analyzer::Checker;
use crate::ast::{Node, NodeKind};
use crate::evaluator;
use crate::parser::BinaryOp;
use crate::stdlib::UNPACK;
use crate::test_utils::{bare_env, init_test_logging, named_env, named_float_type, named_int_type, typed};
use crate::types::{Kind, Type};
use crate::values::Value;
use crate::parser::Span;
use crate::visitor::{Pipeline, RewriteError};

fn unpack_count(node: &Node) -> usize {
    node.count(&|n| n.callee_name() == Some(UNPACK))
}

fn rewrite(source: &str, pipeline: &mut Pipeline) -> Node {
    let env = named_env();
    let root = typed(&env, source);
    pipeline
        .run(root, &Checker::new(&env))
        .unwrap_or_else(|e| panic!("{}: {}", source, e))
}

#[test]
fn test_needs_unwrap() {
    assert!(needs_unwrap(&named_int_type()));
    assert!(needs_unwrap(&named_float_type()));
    assert!(needs_unwrap(&Type::named("Label", Kind::String)));
    assert!(needs_unwrap(&Type::named("Id", Kind::Uint64)));

    assert!(!needs_unwrap(&Type::int()));
    assert!(!needs_unwrap(&Type::basic(Kind::Float32)));
    assert!(!needs_unwrap(&Type::named("Flag", Kind::Bool)));
    assert!(!needs_unwrap(&Type::named("Point", Kind::Struct)));
}

#[test]
fn test_unpack_leaves_basic_trees_untouched() {
    let env = named_env();
    for source in [
        "basicInt() == 42",
        "basicFloat() == 3.0 && basicString() == \"abc\"",
        "if b { [n, basicInt() + 1] } else { nil }",
    ] {
        let before = typed(&env, source);
        let after = Pipeline::new()
            .with(UnpackPatcher)
            .run(before.clone(), &Checker::new(&env))
            .unwrap();
        assert_eq!(after, before, "{}", source);
    }
}

#[test]
fn test_unpack_wraps_named_call() {
    let root = rewrite("namedInt() == 42", &mut Pipeline::new().with(UnpackPatcher));

    let NodeKind::Binary { op, left, right } = &root.kind else {
        panic!("expected a binary root, got {}", root);
    };
    assert_eq!(*op, BinaryOp::Eq);
    assert_eq!(left.callee_name(), Some(UNPACK));
    assert_eq!(left.ty, Some(Type::basic(Kind::Int16)));
    assert_eq!(right.ty, Some(Type::int()));
    assert_eq!(root.ty, Some(Type::bool()));
    assert_eq!(root.to_string(), "unpack(namedInt()) == 42");
}

#[test]
fn test_unpack_one_insertion_per_named_call() {
    let source = "namedInt() == 42 && namedFloat() == 3.0 && namedString() == \"abc\"";
    let root = rewrite(source, &mut Pipeline::new().with(UnpackPatcher));

    assert_eq!(unpack_count(&root), 3);
    assert_eq!(
        root.to_string(),
        "unpack(namedInt()) == 42 && unpack(namedFloat()) == 3.0 && unpack(namedString()) == \"abc\""
    );
}

#[test]
fn test_unpack_twice_equals_once() {
    let sources = [
        "namedInt() == 42",
        "namedInt() == 42 && namedFloat() == 3.0 && namedString() == \"abc\"",
        "[namedInt(), basicInt(), namedString()]",
    ];
    for source in sources {
        let once = rewrite(source, &mut Pipeline::new().with(UnpackPatcher));
        let twice = rewrite(
            source,
            &mut Pipeline::new().with(UnpackPatcher).with(UnpackPatcher),
        );
        assert_eq!(once, twice, "{}", source);
    }
}

#[test]
fn test_unpacked_tree_evaluates() {
    let env = named_env();
    let source = "namedInt() == 42 && namedFloat() == 3.0 && namedString() == \"abc\"";
    let root = Pipeline::new()
        .with(UnpackPatcher)
        .run(typed(&env, source), &Checker::new(&env))
        .unwrap();
    assert_eq!(evaluator::eval(&env, &root).unwrap(), Value::Bool(true));

    // Without the rule the named values never equal the literals.
    let root = typed(&env, source);
    assert_eq!(evaluator::eval(&env, &root).unwrap(), Value::Bool(false));
}

#[test]
fn test_basic_cast_picks_builtin_by_kind_family() {
    init_test_logging();
    let root = rewrite(
        "namedInt() == 42 && namedFloat() == 3.0 && namedString() == \"abc\"",
        &mut Pipeline::new().with(BasicCastPatcher),
    );
    assert_eq!(
        root.to_string(),
        "int(namedInt()) == 42 && float(namedFloat()) == 3.0 && string(namedString()) == \"abc\""
    );
    assert!(root.is_fully_typed());
    assert_eq!(root.count(&|n| matches!(n.kind, NodeKind::BuiltinCall { .. })), 3);
}

#[test]
fn test_basic_cast_result_evaluates() {
    let env = named_env();
    let root = Pipeline::new()
        .with(BasicCastPatcher)
        .run(typed(&env, "namedInt() + 1 == 43"), &Checker::new(&env))
        .unwrap();
    assert_eq!(evaluator::eval(&env, &root).unwrap(), Value::Bool(true));
}

#[test]
fn test_rules_compose() {
    // Once unpacked nothing is left for the cast rule to do.
    let root = rewrite(
        "namedInt() == 42",
        &mut Pipeline::new().with(UnpackPatcher).with(BasicCastPatcher),
    );
    assert_eq!(root.to_string(), "unpack(namedInt()) == 42");
}

#[test]
fn test_rule_names() {
    let pipeline = Pipeline::new().with(UnpackPatcher).with(BasicCastPatcher);
    assert_eq!(pipeline.names(), crate::vec!["unpack", "cast"]);
}

#[test]
fn test_unpack_without_registered_callable_names_the_rule() {
    let env = bare_env();
    let root = typed(&env, "namedInt() == 42");
    let err = Pipeline::new()
        .with(UnpackPatcher)
        .run(root, &Checker::new(&env))
        .unwrap_err();

    assert_eq!(err.span(), Some(&Span(0..10)));
    assert_eq!(
        err.to_string(),
        "rewrite rule 'unpack' left an ill-typed tree: error: Undefined variable 'unpack' [E001] at 0..10"
    );
    let RewriteError::RuleResolution { rule, .. } = &err else {
        panic!("expected a resolution error naming the rule, got {:?}", err);
    };
    assert_eq!(rule.as_str(), "unpack");
    assert!(err.to_diagnostic().message.ends_with("(after rewrite rule 'unpack')"));
}
