//! Tree-walking evaluator for rewritten expression trees.
//!
//! The evaluator interprets typed trees (`Node`) against an [`Environment`]
//! and produces runtime values (`Value`).
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Stack-safe**: Depth tracking prevents stack overflow from deeply nested expressions
//! - **Strict about named types**: a named value is only equal to a named
//!   value of the same type, and arithmetic on it fails; rewrite rules are
//!   what make such expressions work
//!
//! ## Example
//!
//! ```
//! use graft_core::api::environment::Environment;
//! use graft_core::{evaluator, parser};
//! use graft_core::values::Value;
//!
//! let env = Environment::default();
//! let node = parser::parse("1 + 2").unwrap();
//! let result = evaluator::eval(&env, &node).unwrap();
//! assert_eq!(result, Value::Int(3));
//! ```

mod error;
mod eval;
mod operators;


pub use error::{ExecutionError, ExecutionErrorKind, ResourceExceededError, RuntimeError};
pub use eval::Evaluator;

use crate::api::{ExecutionOptions, environment::Environment};
use crate::ast::Node;
use crate::values::Value;

/// Evaluate a tree with default limits.
///
/// Uses default stack depth limit of 1000.
pub fn eval(env: &Environment, node: &Node) -> Result<Value, ExecutionError> {
    eval_with_options(env, node, &ExecutionOptions::default())
}

/// Evaluate a tree with custom limits.
///
/// ## Example
///
/// ```ignore
/// // Allow deeper recursion for specific use case
/// let options = ExecutionOptions { max_depth: 5000 };
/// let result = eval_with_options(&env, &node, &options)?;
/// ```
pub fn eval_with_options(
    env: &Environment,
    node: &Node,
    options: &ExecutionOptions,
) -> Result<Value, ExecutionError> {
    Evaluator::new(env, options.clone()).eval(node)
}
