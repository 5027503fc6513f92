use alloc::string::ToString;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;
use crate::{String, Vec, format, vec};

/// A node's type could not be determined.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    /// Location of the offending node, if it has one.
    pub span: Option<Span>,
}

impl core::fmt::Display for TypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        if let Some(span) = &self.span {
            write!(f, " at {}", span)?;
        }

        Ok(())
    }
}

impl core::error::Error for TypeError {}

/// Specific kinds of type errors
#[derive(Debug, Clone, PartialEq)]
pub enum TypeErrorKind {
    /// Identifier not bound in the environment
    UnboundVariable { name: String },
    /// Call to a name with no registered signature
    UnknownCallable { name: String },
    /// Builtin call to an unknown builtin
    UnknownBuiltin { name: String },
    /// Callee is not something that can be called
    NotCallable { ty: String },
    /// Wrong number of arguments
    ArgumentCountMismatch {
        callee: String,
        expected: usize,
        found: usize,
        variadic: bool,
    },
    /// Argument does not match the declared parameter type
    ArgumentMismatch {
        callee: String,
        index: usize,
        expected: String,
        found: String,
    },
    /// Binary operator applied to unsupported operands
    InvalidOperands {
        op: &'static str,
        left: String,
        right: String,
    },
    /// Unary operator applied to an unsupported operand
    InvalidOperand { op: &'static str, operand: String },
    /// Condition of an `if` is not a bool
    ConditionNotBool { found: String },
    /// Member access on a type without members
    NoMembers { ty: String, property: String },
    /// A child was expected to be resolved already
    UnresolvedChild,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            TypeErrorKind::UnboundVariable { name } => (
                format!("Undefined variable '{}'", name),
                "E001",
                vec!["Make sure the name is registered in the environment".to_string()],
            ),
            TypeErrorKind::UnknownCallable { name } => (
                format!("Unknown function '{}'", name),
                "E002",
                vec!["Register the function with its signature before compiling".to_string()],
            ),
            TypeErrorKind::UnknownBuiltin { name } => {
                (format!("Unknown builtin '{}'", name), "E003", vec![])
            }
            TypeErrorKind::NotCallable { ty } => (
                format!("Cannot call a value of type {}", ty),
                "E004",
                vec![],
            ),
            TypeErrorKind::ArgumentCountMismatch {
                callee,
                expected,
                found,
                variadic,
            } => (
                format!(
                    "'{}' expects {}{} argument(s), found {}",
                    callee,
                    if *variadic { "at least " } else { "" },
                    expected,
                    found
                ),
                "E005",
                vec![],
            ),
            TypeErrorKind::ArgumentMismatch {
                callee,
                index,
                expected,
                found,
            } => (
                format!(
                    "Argument {} of '{}' has type {}, expected {}",
                    index + 1,
                    callee,
                    found,
                    expected
                ),
                "E006",
                vec!["Types must match in this context".to_string()],
            ),
            TypeErrorKind::InvalidOperands { op, left, right } => (
                format!("Invalid operation: {} {} {}", left, op, right),
                "E007",
                vec![],
            ),
            TypeErrorKind::InvalidOperand { op, operand } => (
                format!("Invalid operation: {}{}", op, operand),
                "E008",
                vec![],
            ),
            TypeErrorKind::ConditionNotBool { found } => (
                format!("Condition has type {}, expected bool", found),
                "E009",
                vec!["Condition of 'if' must be bool".to_string()],
            ),
            TypeErrorKind::NoMembers { ty, property } => (
                format!("Type {} has no member '{}'", ty, property),
                "E010",
                vec![],
            ),
            TypeErrorKind::UnresolvedChild => (
                "Child expression has no resolved type".to_string(),
                "E011",
                vec![],
            ),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone().unwrap_or(Span(0..0)),
            related: Vec::new(),
            help,
            code: Some(code.to_string()),
        }
    }
}
