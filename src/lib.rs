//! graft - typed tree rewriting for an embeddable expression language
//!
//! # Overview
//!
//! graft compiles small expressions against a host-provided environment and
//! runs an ordered pipeline of rewrite rules over the typed tree before it is
//! evaluated. Rules see every node after its children, together with its
//! resolved type, and may replace it in place.
//!
//! The bundled rules deal with values of *named types*: types declared by the
//! host over a basic representation (a `Celsius` over `float64`, an `Id` over
//! `int16`). Such values never compare equal to plain literals, so
//! `temperature() == 21.5` is false until a rule unwraps the named value:
//!
//! - [`UnpackPatcher`] rewrites the node into `unpack(node)`
//! - [`BasicCastPatcher`] rewrites it into `int(node)`, `float(node)` or
//!   `string(node)`
//!
//! # Quick Start
//!
//! ```
//! use graft::{Engine, EngineOptions, Kind, Pipeline, RuntimeError, Signature, Type, UnpackPatcher, Value};
//!
//! fn temperature(_: &[Value]) -> Result<Value, RuntimeError> {
//!     Ok(Value::named(Type::named("Celsius", Kind::Float64), Value::Float(21.5)))
//! }
//!
//! let engine = Engine::new(EngineOptions::default(), |env| {
//!     graft::register_stdlib(env)?;
//!     let celsius = Type::named("Celsius", Kind::Float64);
//!     env.function("temperature", Signature::new(vec![], celsius), temperature)
//! })
//! .unwrap();
//!
//! // Without rules the named value is not equal to the literal.
//! let plain = engine.compile("temperature() == 21.5", &mut Pipeline::new()).unwrap();
//! assert_eq!(plain.run().unwrap(), Value::Bool(false));
//!
//! let mut pipeline = Pipeline::new().with(UnpackPatcher);
//! let expr = engine.compile("temperature() == 21.5", &mut pipeline).unwrap();
//! assert_eq!(expr.root().to_string(), "unpack(temperature()) == 21.5");
//! assert_eq!(expr.run().unwrap(), Value::Bool(true));
//! ```
//!
//! # Writing Rules
//!
//! A rule is any type implementing [`Visitor`]. It receives a [`Cursor`] per
//! node and may patch the node at most once per visit; the replacement is
//! re-typed and offered to the same rule again.

// Re-export public API from graft_core
pub use graft_core::api::{
    Binding, CompilationOptions, CompiledExpression, Diagnostic, Engine, EngineOptions,
    Environment, EnvironmentBuilder, Error, ExecutionOptions, RelatedInfo, Severity,
};

// Re-export the tree, types and values
pub use graft_core::ast::{self, Node, NodeKind};
pub use graft_core::types::{self, Kind, Signature, Type};
pub use graft_core::values::{self, NativeFn, Value};

// Re-export rewriting
pub use graft_core::patchers::{self, BasicCastPatcher, UnpackPatcher};
pub use graft_core::stdlib::register_stdlib;
pub use graft_core::visitor::{self, Cursor, Pipeline, Visitor};

// Re-export errors
pub use graft_core::evaluator::RuntimeError;

pub use graft_core::demo;
pub mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
