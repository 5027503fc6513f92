use ecow::EcoString;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use super::error::{ParseError, ParseErrorKind, convert_pest_error};
use super::syntax::{BinaryOp, Span, UnaryOp};
use crate::ast::{Node, NodeKind};
use crate::stdlib::is_builtin;
use crate::{Box, String, ToString, Vec, format};

/// Nesting allowed by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 500;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::or, Assoc::Left))            // `||`
        .op(Op::infix(Rule::and, Assoc::Left))           // `&&`

        // Comparison operators.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::ne, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left)
        )                                               // `==`, `!=`, `<`, `<=`, `>`, `>=`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::rem, Assoc::Left)
        )                                               // `*`, `/`, `%`
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::not)) // `-`, `!`

        // Postfix operators.
        .op(Op::postfix(Rule::call_op) | Op::postfix(Rule::member_op)) // `()`, `.`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

/// Parse `source` into an untyped tree. Every node carries the span of the
/// text it was parsed from.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], rejecting inputs nested deeper than `max_depth`
/// brackets before handing them to the grammar.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Node, ParseError> {
    check_delimiters(source, max_depth)?;

    let mut pairs = ExpressionParser::parse(Rule::main, source)
        .map_err(|err| convert_pest_error(err, source))?;
    let Some(main) = pairs.next() else {
        return Err(other(source, Span(0..source.len()), "empty parse result"));
    };
    let builder = Builder { source };
    let Some(expression) = main.into_inner().next() else {
        return Err(other(source, Span(0..source.len()), "missing expression"));
    };
    builder.node(expression)
}

struct Builder<'s> {
    source: &'s str,
}

impl Builder<'_> {
    fn node(&self, pair: Pair<Rule>) -> Result<Node, ParseError> {
        let span = Span::from(pair.as_span());
        match pair.as_rule() {
            Rule::expression => self.expression(pair),

            Rule::integer => {
                let text = pair.as_str();
                let value = text.parse::<i64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        self.source.to_string(),
                        span.clone(),
                    )
                })?;
                Ok(Node::int(value).with_span(span))
            }

            Rule::float => {
                let text = pair.as_str();
                let value = text.parse::<f64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        self.source.to_string(),
                        span.clone(),
                    )
                })?;
                Ok(Node::float(value).with_span(span))
            }

            Rule::string => {
                let value = self.string(pair)?;
                Ok(Node::str(value).with_span(span))
            }

            Rule::boolean => Ok(Node::bool(pair.as_str() == "true").with_span(span)),

            Rule::nil => Ok(Node::nil().with_span(span)),

            Rule::ident => Ok(Node::ident(pair.as_str()).with_span(span)),

            Rule::array => {
                let items = pair
                    .into_inner()
                    .map(|item| self.node(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::sequence(items).with_span(span))
            }

            Rule::map => {
                let entries = pair
                    .into_inner()
                    .map(|entry| self.map_entry(entry))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::map(entries).with_span(span))
            }

            Rule::if_expr => {
                let mut parts = pair
                    .into_inner()
                    .filter(|p| matches!(p.as_rule(), Rule::expression | Rule::if_expr));
                let (Some(cond), Some(then_branch)) = (parts.next(), parts.next()) else {
                    return Err(other(self.source, span, "incomplete if expression"));
                };
                let cond = self.node(cond)?;
                let then_branch = self.node(then_branch)?;
                let else_branch = parts.next().map(|p| self.node(p)).transpose()?;
                Ok(Node::conditional(cond, then_branch, else_branch).with_span(span))
            }

            rule => Err(other(
                self.source,
                span,
                &format!("unhandled rule: {:?}", rule),
            )),
        }
    }

    fn expression(&self, pair: Pair<Rule>) -> Result<Node, ParseError> {
        PRATT_PARSER
            .map_primary(|primary| self.node(primary))
            .map_prefix(|op, rhs| {
                let rhs = rhs?;
                let unary = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::not => UnaryOp::Not,
                    rule => return Err(self.unexpected(&op, rule)),
                };
                let span = join(Span::from(op.as_span()), rhs.span.as_ref());
                Ok(Node::unary(unary, rhs).with_span(span))
            })
            .map_infix(|lhs, op, rhs| {
                let (lhs, rhs) = (lhs?, rhs?);
                let binary = match op.as_rule() {
                    Rule::or => BinaryOp::Or,
                    Rule::and => BinaryOp::And,
                    Rule::eq => BinaryOp::Eq,
                    Rule::ne => BinaryOp::Ne,
                    Rule::lt => BinaryOp::Lt,
                    Rule::le => BinaryOp::Le,
                    Rule::gt => BinaryOp::Gt,
                    Rule::ge => BinaryOp::Ge,
                    Rule::add => BinaryOp::Add,
                    Rule::sub => BinaryOp::Sub,
                    Rule::mul => BinaryOp::Mul,
                    Rule::div => BinaryOp::Div,
                    Rule::rem => BinaryOp::Rem,
                    rule => return Err(self.unexpected(&op, rule)),
                };
                let span = match (&lhs.span, &rhs.span) {
                    (Some(l), Some(r)) => Some(Span::combine(l, r)),
                    _ => None,
                };
                let node = Node::binary(binary, lhs, rhs);
                Ok(match span {
                    Some(span) => node.with_span(span),
                    None => node,
                })
            })
            .map_postfix(|lhs, op| {
                let lhs = lhs?;
                let op_span = Span::from(op.as_span());
                let span = match &lhs.span {
                    Some(l) => Span::combine(l, &op_span),
                    None => op_span,
                };
                match op.as_rule() {
                    Rule::call_op => {
                        let args = op
                            .into_inner()
                            .map(|arg| self.node(arg))
                            .collect::<Result<Vec<_>, _>>()?;
                        let node = match lhs.kind {
                            NodeKind::Identifier(name) if is_builtin(&name) => {
                                Node::builtin(name, args)
                            }
                            _ => Node::new(NodeKind::Call {
                                callee: Box::new(lhs),
                                args,
                            }),
                        };
                        Ok(node.with_span(span))
                    }
                    Rule::member_op => {
                        let Some(property) = op.into_inner().next() else {
                            return Err(other(self.source, span, "missing member name"));
                        };
                        Ok(Node::member(lhs, property.as_str()).with_span(span))
                    }
                    rule => Err(self.unexpected(&op, rule)),
                }
            })
            .parse(pair.into_inner())
    }

    fn map_entry(&self, pair: Pair<Rule>) -> Result<(Node, Node), ParseError> {
        let span = Span::from(pair.as_span());
        let mut inner = pair.into_inner();
        let (Some(key), Some(value)) = (inner.next(), inner.next()) else {
            return Err(other(self.source, span, "incomplete map entry"));
        };
        let key = match key.as_rule() {
            // Bare identifier keys name a string.
            Rule::ident => Node::str(key.as_str()).with_span(Span::from(key.as_span())),
            _ => self.node(key)?,
        };
        Ok((key, self.node(value)?))
    }

    fn string(&self, pair: Pair<Rule>) -> Result<EcoString, ParseError> {
        let span = Span::from(pair.as_span());
        let raw = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
        let mut out = EcoString::new();
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(c) => {
                    return Err(other(
                        self.source,
                        span,
                        &format!("invalid escape sequence '\\{}'", c),
                    ));
                }
                None => return Err(other(self.source, span, "unterminated escape sequence")),
            }
        }
        Ok(out)
    }

    fn unexpected(&self, op: &Pair<Rule>, rule: Rule) -> ParseError {
        other(
            self.source,
            Span::from(op.as_span()),
            &format!("unexpected operator rule: {:?}", rule),
        )
    }
}

fn join(start: Span, end: Option<&Span>) -> Span {
    match end {
        Some(end) => Span::combine(&start, end),
        None => start,
    }
}

fn other(source: &str, span: Span, message: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: String::from(message),
        },
        source.to_string(),
        span,
    )
}

/// Reject unclosed delimiters and excessive nesting before parsing.
///
/// String literals and comments are skipped. Mismatched closers are left to
/// the grammar.
fn check_delimiters(source: &str, max_depth: usize) -> Result<(), ParseError> {
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut chars = source.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '"' => {
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '(' | '[' | '{' => {
                open.push((c, pos));
                if open.len() > max_depth {
                    return Err(ParseError::new(
                        ParseErrorKind::MaxDepthExceeded {
                            depth: open.len(),
                            max_depth,
                        },
                        source.to_string(),
                        Span(pos..pos + 1),
                    ));
                }
            }
            ')' | ']' | '}' => {
                open.pop();
            }
            _ => {}
        }
    }

    match open.last() {
        Some(&(delimiter, pos)) => Err(ParseError::new(
            ParseErrorKind::UnclosedDelimiter { delimiter },
            source.to_string(),
            Span(pos..pos + 1),
        )),
        None => Ok(()),
    }
}
