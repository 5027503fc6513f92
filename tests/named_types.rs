/*
 * Named Type Tests
 *
 * Expressions over the demo environment, where every primitive family has a
 * function returning a named-type value and one returning the basic value.
 */

#[macro_use]
mod cases;

use graft::{NodeKind, Pipeline, UnpackPatcher, Value};
use indoc::indoc;
use pretty_assertions::assert_eq;

use cases::{ENGINE, pipeline};

test_case! {
    name: named_float_equals_literal,
    input: "namedFloat() == 3.0",
    rewritten: { "unpack(namedFloat()) == 3.0" },
    value: { Value::Bool(true) },
}

test_case! {
    name: named_int_equals_literal,
    input: "namedInt() == 42",
    rewritten: { "unpack(namedInt()) == 42" },
    value: { Value::Bool(true) },
}

test_case! {
    name: basic_int_is_left_alone,
    input: "basicInt() == 42",
    rewritten: { "basicInt() == 42" },
    value: { Value::Bool(true) },
}

test_case! {
    name: basic_float_is_left_alone,
    input: "basicFloat() == 3.0",
    rewritten: { "basicFloat() == 3.0" },
    value: { Value::Bool(true) },
}

test_case! {
    name: named_string_equals_literal,
    input: r#"namedString() == "abc""#,
    rewritten: { r#"unpack(namedString()) == "abc""# },
    value: { Value::Bool(true) },
}

test_case! {
    name: basic_string_is_left_alone,
    input: r#"basicString() == "abc""#,
    rewritten: { r#"basicString() == "abc""# },
    value: { Value::Bool(true) },
}

test_case! {
    name: conjunction_of_named_comparisons,
    input: r#"namedInt() == 42 && namedFloat() == 3.0 && namedString() == "abc""#,
    rewritten: { r#"unpack(namedInt()) == 42 && unpack(namedFloat()) == 3.0 && unpack(namedString()) == "abc""# },
    value: { Value::Bool(true) },
}

test_case! {
    name: named_values_differ_from_literals_without_rules,
    input: r#"namedInt() == 42 || namedFloat() == 3.0 || namedString() == "abc""#,
    rule: "none",
    value: { Value::Bool(false) },
}

test_case! {
    name: named_arithmetic_after_unpack,
    input: "namedInt() * 2 + basicInt() == 126",
    rewritten: { "unpack(namedInt()) * 2 + basicInt() == 126" },
    value: { Value::Bool(true) },
}

test_case! {
    name: named_values_inside_collections,
    input: r#"[namedInt(), basicInt(), namedString()]"#,
    rewritten: { r#"[unpack(namedInt()), basicInt(), unpack(namedString())]"# },
    value: { Value::Array(vec![Value::Int(42), Value::Int(42), Value::str("abc")]) },
}

test_case! {
    name: named_value_in_else_branch,
    input: "if false { 0 } else { namedInt() }",
    rewritten: { "if false { 0 } else { unpack(namedInt()) }" },
    value: { Value::Int(42) },
}

test_case! {
    name: cast_rule_int,
    input: "namedInt() == 42",
    rule: "cast",
    rewritten: { "int(namedInt()) == 42" },
    value: { Value::Bool(true) },
}

test_case! {
    name: cast_rule_float,
    input: "namedFloat() == 3.0",
    rule: "cast",
    rewritten: { "float(namedFloat()) == 3.0" },
    value: { Value::Bool(true) },
}

test_case! {
    name: cast_rule_string,
    input: r#"namedString() == "abc""#,
    rule: "cast",
    rewritten: { r#"string(namedString()) == "abc""# },
    value: { Value::Bool(true) },
}

test_case! {
    name: cast_rule_leaves_basic_values,
    input: r#"basicInt() == 42 && basicString() == "abc""#,
    rule: "cast",
    rewritten: { r#"basicInt() == 42 && basicString() == "abc""# },
    value: { Value::Bool(true) },
}

test_case! {
    name: unpack_then_cast_inserts_once,
    input: "namedInt() == 42",
    rule: "both",
    rewritten: { "unpack(namedInt()) == 42" },
    value: { Value::Bool(true) },
}

test_case! {
    name: multi_line_expression_with_comments,
    input: indoc! {r#"
        // every family at once
        namedInt() == 42
            && namedFloat() == 3.0
            && namedString() == "abc"
    "#},
    rewritten: { r#"unpack(namedInt()) == 42 && unpack(namedFloat()) == 3.0 && unpack(namedString()) == "abc""# },
    value: { Value::Bool(true) },
}

#[test]
fn test_conjunction_gets_exactly_three_unpacks() {
    let source = r#"namedInt() == 42 && namedFloat() == 3.0 && namedString() == "abc""#;
    let expr = ENGINE.compile(source, &mut pipeline("unpack")).unwrap();
    let unpacks = expr.root().count(&|n| n.callee_name() == Some("unpack"));
    assert_eq!(unpacks, 3);
    assert_eq!(expr.run().unwrap(), Value::Bool(true));
}

#[test]
fn test_basic_tree_is_identical_after_rewrite() {
    let source = r#"basicInt() == 42 && basicString() == "abc""#;
    let plain = ENGINE.compile(source, &mut pipeline("none")).unwrap();
    let rewritten = ENGINE.compile(source, &mut pipeline("unpack")).unwrap();
    assert_eq!(rewritten.root(), plain.root());
}

#[test]
fn test_rewriting_twice_changes_nothing() {
    let source = r#"namedInt() == 42 && namedFloat() == 3.0 && namedString() == "abc""#;
    let once = ENGINE.compile(source, &mut pipeline("unpack")).unwrap();
    let mut twice_pipeline = Pipeline::new().with(UnpackPatcher).with(UnpackPatcher);
    let twice = ENGINE.compile(source, &mut twice_pipeline).unwrap();
    assert_eq!(twice.root(), once.root());
}

#[test]
fn test_wrapper_takes_over_source_location() {
    let source = "namedInt() == 42";
    let expr = ENGINE.compile(source, &mut pipeline("unpack")).unwrap();
    let NodeKind::Binary { left, .. } = &expr.root().kind else {
        panic!("expected a comparison, got {}", expr.root());
    };
    assert_eq!(left.callee_name(), Some("unpack"));
    assert_eq!(left.span.as_ref().map(|s| s.str_of(source)), Some("namedInt()"));
    assert!(expr.root().is_fully_typed());
}
