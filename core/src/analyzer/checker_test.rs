use pretty_assertions::assert_eq;

use super::*;
use crate::api::{EnvironmentBuilder, environment::Environment};
use crate::ast::{Node, NodeKind};
use crate::evaluator::RuntimeError;
use crate::parser::{self, Span};
use crate::types::{Kind, Signature, Type, TypeResolver};
use crate::values::Value;
use crate::{format, vec};

fn unused(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Nil)
}

fn test_env() -> Environment {
    let mut env = EnvironmentBuilder::new();
    env.function("namedInt", Signature::new(vec![], Type::named("namedIntType", Kind::Int16)), unused)
        .unwrap();
    env.function("basicInt", Signature::new(vec![], Type::int()), unused)
        .unwrap();
    env.function(
        "pair",
        Signature::new(vec![Type::int(), Type::string()], Type::bool()),
        unused,
    )
    .unwrap();
    env.variable("n", Type::int(), Value::Int(1)).unwrap();
    env.variable("u", Type::uint(), Value::Uint(1)).unwrap();
    env.variable("f", Type::basic(Kind::Float32), Value::Float(1.0))
        .unwrap();
    env.variable("s", Type::string(), Value::str("s")).unwrap();
    env.variable("b", Type::bool(), Value::Bool(true)).unwrap();
    env.variable("m", Type::basic(Kind::Map), Value::Map(vec![]))
        .unwrap();
    env.variable("dyn", Type::any(), Value::Nil).unwrap();
    crate::stdlib::register_stdlib(&mut env).unwrap();
    env.build()
}

// Helper to parse and analyze a source string
fn analyze_source(source: &str) -> Result<(Node, Type), TypeError> {
    let env = test_env();
    let mut node =
        parser::parse(source).unwrap_or_else(|e| panic!("Parse error in {}: {}", source, e));
    let ty = analyze(&env, &mut node)?;
    Ok((node, ty))
}

fn type_of(source: &str) -> Type {
    match analyze_source(source) {
        Ok((_, ty)) => ty,
        Err(e) => panic!("{} failed to type: {}", source, e),
    }
}

fn error_of(source: &str) -> TypeErrorKind {
    match analyze_source(source) {
        Ok((_, ty)) => panic!("{} unexpectedly typed as {}", source, ty),
        Err(e) => e.kind,
    }
}

// ============================================================================
// Binary Operations
// ============================================================================

#[test]
fn test_arithmetic_operators_integers() {
    for op in ["+", "-", "*", "/", "%"] {
        let source = format!("1 {} n", op);
        assert_eq!(type_of(&source), Type::int(), "Failed for operator {}", op);
    }
    assert_eq!(type_of("n + u"), Type::int());
}

#[test]
fn test_arithmetic_operators_mixed() {
    assert_eq!(type_of("1 + 2.0"), Type::float());
    assert_eq!(type_of("f * 2"), Type::float());
    assert_eq!(type_of("dyn + 1"), Type::any());
    assert_eq!(type_of("s + \"x\""), Type::string());
}

#[test]
fn test_arithmetic_on_named_types_yields_basic_type() {
    assert_eq!(type_of("namedInt() + 1"), Type::int());
    assert!(!type_of("namedInt() + 1").is_named());
}

#[test]
fn test_invalid_arithmetic() {
    assert_eq!(
        error_of("s - 1"),
        TypeErrorKind::InvalidOperands {
            op: "-",
            left: "string".into(),
            right: "int".into(),
        }
    );
    assert!(matches!(error_of("b + b"), TypeErrorKind::InvalidOperands { .. }));
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(type_of("namedInt() == 42"), Type::bool());
    assert_eq!(type_of("s != 1"), Type::bool());
    assert_eq!(type_of("n < f"), Type::bool());
    assert_eq!(type_of("s >= \"a\""), Type::bool());
    assert_eq!(type_of("b && !b || dyn"), Type::bool());

    assert!(matches!(error_of("s < 1"), TypeErrorKind::InvalidOperands { op: "<", .. }));
    assert!(matches!(error_of("n && b"), TypeErrorKind::InvalidOperands { op: "&&", .. }));
    assert!(matches!(error_of("!n"), TypeErrorKind::InvalidOperand { op: "!", .. }));
}

#[test]
fn test_negation_keeps_operand_type() {
    assert_eq!(type_of("-f"), Type::basic(Kind::Float32));
    assert_eq!(type_of("-namedInt()"), Type::named("namedIntType", Kind::Int16));
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_call_results() {
    assert_eq!(type_of("namedInt()"), Type::named("namedIntType", Kind::Int16));
    assert_eq!(type_of("basicInt()"), Type::int());
    assert_eq!(type_of("pair(1, \"a\")"), Type::bool());
    assert_eq!(type_of("unpack(namedInt())"), Type::basic(Kind::Int16));
    assert_eq!(type_of("unpack(s, n, b)"), Type::string());
}

#[test]
fn test_call_errors() {
    // The callee identifier is resolved first.
    assert_eq!(
        error_of("missing()"),
        TypeErrorKind::UnboundVariable {
            name: "missing".into()
        }
    );
    assert!(matches!(error_of("n()"), TypeErrorKind::NotCallable { .. }));
    assert!(matches!(
        error_of("pair(1)"),
        TypeErrorKind::ArgumentCountMismatch { expected: 2, found: 1, .. }
    ));
    assert!(matches!(
        error_of("pair(\"a\", \"b\")"),
        TypeErrorKind::ArgumentMismatch { index: 0, .. }
    ));
    assert!(matches!(error_of("m.k()"), TypeErrorKind::NotCallable { .. }));
}

#[test]
fn test_unknown_callable() {
    let env = test_env();
    let checker = Checker::new(&env);
    // A callee typed by someone else, naming nothing registered.
    let mut node = Node::call("missing", vec![]);
    if let NodeKind::Call { callee, .. } = &mut node.kind {
        callee.ty = Some(Type::basic(Kind::Func));
    }
    assert_eq!(
        checker.resolve(&node).unwrap_err().kind,
        TypeErrorKind::UnknownCallable {
            name: "missing".into()
        }
    );
}

#[test]
fn test_call_error_points_at_call() {
    let err = analyze_source("1 + pair(1)").unwrap_err();
    assert_eq!(err.span, Some(Span(4..11)));
}

#[test]
fn test_builtin_calls() {
    assert_eq!(type_of("int(namedInt())"), Type::int());
    assert_eq!(type_of("float(\"1.5\")"), Type::float());
    assert_eq!(type_of("string(b)"), Type::string());
    assert_eq!(type_of("len(m)"), Type::int());
    assert!(matches!(error_of("len(n)"), TypeErrorKind::ArgumentMismatch { .. }));
}

// ============================================================================
// Other Nodes
// ============================================================================

#[test]
fn test_identifiers() {
    assert_eq!(type_of("u"), Type::uint());
    assert_eq!(type_of("basicInt"), Type::basic(Kind::Func));
    assert_eq!(
        error_of("nope"),
        TypeErrorKind::UnboundVariable {
            name: "nope".into()
        }
    );
}

#[test]
fn test_member_access() {
    assert_eq!(type_of("m.anything"), Type::any());
    assert_eq!(type_of("dyn.x.y"), Type::any());
    assert!(matches!(error_of("s.len"), TypeErrorKind::NoMembers { .. }));
}

#[test]
fn test_conditionals() {
    assert_eq!(type_of("if b { 1 } else { 2 }"), Type::int());
    assert_eq!(type_of("if b { 1 } else { \"x\" }"), Type::any());
    assert_eq!(type_of("if b { 1 }"), Type::any());
    assert_eq!(type_of("if dyn { 1 } else { 2 }"), Type::int());
    assert!(matches!(error_of("if n { 1 }"), TypeErrorKind::ConditionNotBool { .. }));
}

#[test]
fn test_collections() {
    assert_eq!(type_of("[1, \"a\"]"), Type::basic(Kind::Array));
    assert_eq!(type_of("{a: 1}"), Type::basic(Kind::Map));
}

#[test]
fn test_analyze_types_every_node() {
    let (node, _) = analyze_source("if b { [namedInt(), {k: -f}] } else { nil }").unwrap();
    assert!(node.is_fully_typed());
    let NodeKind::Conditional { then_branch, .. } = &node.kind else {
        unreachable!()
    };
    assert_eq!(then_branch.ty, Some(Type::basic(Kind::Array)));
}

#[test]
fn test_resolve_needs_typed_children() {
    let env = test_env();
    let checker = Checker::new(&env);
    let node = Node::binary(crate::parser::BinaryOp::Add, Node::int(1), Node::int(2));
    assert_eq!(
        checker.resolve(&node).unwrap_err().kind,
        TypeErrorKind::UnresolvedChild
    );
}
