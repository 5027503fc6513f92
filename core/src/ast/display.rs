//! Source-like rendering of trees.

use core::fmt::{self, Display, Formatter};

use super::{Literal, MapEntry, Node, NodeKind};

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Identifier(name) => f.write_str(name),
            NodeKind::Literal(literal) => write!(f, "{}", literal),
            NodeKind::Unary { op, operand } => {
                write!(f, "{}", op)?;
                if matches!(operand.kind, NodeKind::Binary { .. }) {
                    write!(f, "({})", operand)
                } else {
                    write!(f, "{}", operand)
                }
            }
            NodeKind::Binary { op, left, right } => {
                write_operand(f, left, op.precedence(), false)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, op.precedence(), true)
            }
            NodeKind::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            NodeKind::BuiltinCall { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            NodeKind::Member { object, property } => write!(f, "{}.{}", object, property),
            NodeKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                write!(f, "if {} {{ {} }}", cond, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {{ {} }}", else_branch)?;
                }
                Ok(())
            }
            NodeKind::Sequence(items) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            }
            NodeKind::Map(entries) => {
                write!(f, "{{")?;
                for (i, MapEntry { key, value }) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_operand(f: &mut Formatter<'_>, node: &Node, parent: u8, right: bool) -> fmt::Result {
    match &node.kind {
        // Operators are left-associative, so an equal-precedence right operand needs parens.
        NodeKind::Binary { op, .. }
            if op.precedence() < parent || (right && op.precedence() == parent) =>
        {
            write!(f, "({})", node)
        }
        _ => write!(f, "{}", node),
    }
}

fn write_list(f: &mut Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", node)?;
    }
    Ok(())
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => format_float(f, *value),
            Literal::Str(value) => {
                write!(f, "\"")?;
                for c in value.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Nil => write!(f, "nil"),
        }
    }
}

/// Floats always show a fractional part so they read back as floats.
pub(crate) fn format_float(f: &mut Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value == (value as i64) as f64 {
        write!(f, "{:.1}", value)
    } else {
        write!(f, "{}", value)
    }
}
