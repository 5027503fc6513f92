//! Public API for graft.
//!
//! This module provides the stable public API for compiling and executing
//! expressions through a rewrite pipeline:
//!
//! 1. An [`Engine`] owns the global environment built at construction.
//! 2. [`Engine::compile`] parses, type-checks and rewrites an expression.
//! 3. [`CompiledExpression::run`] evaluates the rewritten tree.
//!
//! # Example
//!
//! ```
//! use graft_core::api::{Engine, EngineOptions};
//! use graft_core::types::Type;
//! use graft_core::values::Value;
//! use graft_core::visitor::Pipeline;
//!
//! let engine = Engine::new(EngineOptions::default(), |env| {
//!     env.variable("pi", Type::float(), Value::Float(3.14159))
//! })
//! .unwrap();
//!
//! let expr = engine.compile("pi * 2.0 > 6.0", &mut Pipeline::new()).unwrap();
//! assert_eq!(expr.run().unwrap(), Value::Bool(true));
//! ```

pub mod engine;
pub mod environment;
pub mod error;
pub mod expression;
pub mod options;

pub use engine::Engine;
pub use environment::{Binding, Environment, EnvironmentBuilder};
pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use expression::CompiledExpression;
pub use options::{CompilationOptions, EngineOptions, ExecutionOptions};
