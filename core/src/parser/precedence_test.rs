use pretty_assertions::assert_eq;

use super::parser::parse;
use crate::ast::Node;

// Helper function to parse an expression and return the tree without spans.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same tree.
fn ast(source: &str) -> Node {
    let mut node =
        parse(source).unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e));
    strip_spans(&mut node);
    node
}

fn strip_spans(node: &mut Node) {
    node.span = None;
    for mut slot in node.slots() {
        if let Some(child) = slot.get_mut() {
            strip_spans(child);
        }
    }
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("a + b - c"), ast("(a + b) - c"));
    assert_eq!(ast("a - b + c"), ast("(a - b) + c"));
    assert_eq!(
        ast("a + b - c + d - e + f"),
        ast("((((a + b) - c) + d) - e) + f")
    );
}

#[test]
fn test_multiplication_vs_division() {
    assert_eq!(ast("a * b / c"), ast("(a * b) / c"));
    assert_eq!(ast("a / b * c % d"), ast("((a / b) * c) % d"));
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("a + b * c"), ast("a + (b * c)"));
    assert_eq!(ast("a * b + c"), ast("(a * b) + c"));
}

#[test]
fn test_and_vs_or() {
    assert_eq!(
        ast("true && false || true"),
        ast("(true && false) || true")
    );
    assert_eq!(
        ast("true || false && true"),
        ast("true || (false && true)")
    );
}

#[test]
fn test_comparison_vs_logical() {
    assert_eq!(
        ast("a == 1 && b != 2 || c < 3"),
        ast("((a == 1) && (b != 2)) || (c < 3)")
    );
    assert_eq!(ast("a + 1 >= b * 2"), ast("(a + 1) >= (b * 2)"));
}

#[test]
fn test_unary_vs_binary() {
    assert_eq!(ast("--a"), ast("-(-a)"));
    assert_eq!(ast("-a + b"), ast("(-a) + b"));
    assert_eq!(ast("a + -b"), ast("a + (-b)"));
    assert_eq!(ast("!a && b"), ast("(!a) && b"));
}

#[test]
fn test_postfix_binds_tightest() {
    assert_eq!(ast("-f(x)"), ast("-(f(x))"));
    assert_eq!(ast("a.b.c"), ast("(a.b).c"));
    assert_eq!(ast("f(x).y + 1"), ast("((f(x)).y) + 1"));
}
