//! Runtime evaluation errors.
//!
//! These are errors that can occur during expression evaluation.
//! Many error conditions (undefined variables, calls to unknown functions)
//! are caught by the analyzer and never reach the evaluator.
//!
//! # Error Categories
//!
//! - **Runtime errors**: logic errors during evaluation (e.g., division by
//!   zero, an operator applied to a named-type value that was not unpacked).
//!
//! - **Resource exceeded errors**: fatal resource limit violations
//!   (e.g., stack overflow).

use crate::String;
use crate::parser::Span;
use core::fmt;

/// Evaluation failure, with the location of the node that failed.
#[derive(Debug)]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub span: Option<Span>,
}

#[derive(Debug)]
pub enum ExecutionErrorKind {
    Runtime(RuntimeError),
    ResourceExceeded(ResourceExceededError),
}

/// Runtime errors raised while evaluating a well-typed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Division or remainder by zero (integer operands).
    DivisionByZero,

    /// Integer arithmetic overflowed.
    IntegerOverflow { op: &'static str },

    /// Operator applied to values it does not support.
    ///
    /// This is what happens when a named-type value reaches arithmetic or
    /// ordering without having been unpacked first.
    InvalidOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    /// Unary operator applied to a value it does not support.
    InvalidOperand { op: &'static str, operand: String },

    /// Condition of an `if` did not evaluate to a bool.
    ConditionNotBool { found: String },

    /// Host function received arguments it cannot handle.
    InvalidArgument { callee: String, message: String },

    /// Call to a name with no registered implementation.
    UnknownFunction { name: String },

    /// Variable lookup failed at run time.
    UndefinedVariable { name: String },

    /// Conversion between representations failed (e.g., `int("abc")`).
    CastError { message: String },
}

/// Resource limit exceeded errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceExceededError {
    /// Evaluation recursion depth exceeded.
    StackOverflow { depth: usize, max_depth: usize },
}

impl ExecutionError {
    pub fn new(kind: ExecutionErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    /// The runtime error, when this is not a resource limit violation.
    pub fn runtime(&self) -> Option<&RuntimeError> {
        match &self.kind {
            ExecutionErrorKind::Runtime(e) => Some(e),
            ExecutionErrorKind::ResourceExceeded(_) => None,
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExecutionErrorKind::Runtime(e) => write!(f, "{}", e)?,
            ExecutionErrorKind::ResourceExceeded(e) => write!(f, "{}", e)?,
        }
        if let Some(span) = &self.span {
            write!(f, " at {}", span)?;
        }
        Ok(())
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
            RuntimeError::IntegerOverflow { op } => {
                write!(f, "Integer overflow in '{}'", op)
            }
            RuntimeError::InvalidOperands { op, left, right } => {
                write!(f, "Invalid operation: {} {} {}", left, op, right)
            }
            RuntimeError::InvalidOperand { op, operand } => {
                write!(f, "Invalid operation: {}{}", op, operand)
            }
            RuntimeError::ConditionNotBool { found } => {
                write!(f, "Condition evaluated to {}, expected bool", found)
            }
            RuntimeError::InvalidArgument { callee, message } => {
                write!(f, "Invalid argument to '{}': {}", callee, message)
            }
            RuntimeError::UnknownFunction { name } => {
                write!(f, "No implementation registered for '{}'", name)
            }
            RuntimeError::UndefinedVariable { name } => {
                write!(f, "Undefined variable '{}'", name)
            }
            RuntimeError::CastError { message } => write!(f, "Cast error: {}", message),
        }
    }
}

impl fmt::Display for ResourceExceededError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceExceededError::StackOverflow { depth, max_depth } => {
                write!(
                    f,
                    "Evaluation stack overflow: depth {} exceeds maximum of {}",
                    depth, max_depth
                )
            }
        }
    }
}

// Convenient conversions for error construction
impl From<RuntimeError> for ExecutionErrorKind {
    fn from(e: RuntimeError) -> Self {
        ExecutionErrorKind::Runtime(e)
    }
}

impl From<ResourceExceededError> for ExecutionErrorKind {
    fn from(e: ResourceExceededError) -> Self {
        ExecutionErrorKind::ResourceExceeded(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExecutionError {}

#[cfg(feature = "std")]
impl std::error::Error for RuntimeError {}

#[cfg(feature = "std")]
impl std::error::Error for ResourceExceededError {}
