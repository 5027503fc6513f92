//! The graft compilation engine.

use super::environment::Environment;
use super::{CompilationOptions, CompiledExpression, EngineOptions, EnvironmentBuilder, Error};
use crate::visitor::Pipeline;
use crate::{String, analyzer, parser};

/// The graft compilation and execution engine.
///
/// The engine manages:
/// - Global environment (variables and host functions)
/// - Compilation and execution defaults (EngineOptions)
///
/// Compiling runs the source through the parser, the checker and then the
/// rewrite pipeline, in that order.
///
/// # Example
///
/// ```
/// use graft_core::api::{Engine, EngineOptions};
/// use graft_core::evaluator::RuntimeError;
/// use graft_core::patchers::UnpackPatcher;
/// use graft_core::stdlib::register_stdlib;
/// use graft_core::types::{Kind, Signature, Type};
/// use graft_core::values::Value;
/// use graft_core::visitor::Pipeline;
///
/// fn named_int(_: &[Value]) -> Result<Value, RuntimeError> {
///     Ok(Value::named(Type::named("namedIntType", Kind::Int16), Value::Int(42)))
/// }
///
/// let engine = Engine::new(EngineOptions::default(), |env| {
///     register_stdlib(env)?;
///     let ret = Type::named("namedIntType", Kind::Int16);
///     env.function("namedInt", Signature::new(vec![], ret), named_int)
/// })
/// .unwrap();
///
/// let mut pipeline = Pipeline::new().with(UnpackPatcher);
/// let expr = engine.compile("namedInt() == 42", &mut pipeline).unwrap();
/// assert_eq!(expr.root().to_string(), "unpack(namedInt()) == 42");
/// assert_eq!(expr.run().unwrap(), Value::Bool(true));
/// ```
#[derive(Debug)]
pub struct Engine {
    environment: Environment,
    options: EngineOptions,
}

impl Engine {
    /// Create a new engine with a custom environment.
    ///
    /// The initialization closure registers globals through the builder;
    /// its first error aborts construction.
    pub fn new(
        options: EngineOptions,
        init: impl FnOnce(&mut EnvironmentBuilder) -> Result<(), Error>,
    ) -> Result<Self, Error> {
        let mut env_builder = EnvironmentBuilder::new();
        init(&mut env_builder)?;
        let environment = env_builder.build();
        tracing::debug!(names = environment.len(), "engine environment built");

        Ok(Self {
            environment,
            options,
        })
    }

    /// Access the global environment.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compile an expression with the engine's default compilation options.
    ///
    /// The pipeline's visitors run in order over the analyzed tree; pass an
    /// empty [`Pipeline`] to compile without rewriting.
    pub fn compile(
        &self,
        source: &str,
        pipeline: &mut Pipeline,
    ) -> Result<CompiledExpression<'_>, Error> {
        let options = self.options.default_compilation_options.clone();
        self.compile_with(options, source, pipeline)
    }

    /// Compile an expression with explicit compilation options.
    pub fn compile_with(
        &self,
        options: CompilationOptions,
        source: &str,
        pipeline: &mut Pipeline,
    ) -> Result<CompiledExpression<'_>, Error> {
        let mut root = parser::parse(source).map_err(|e| Error::from(e).with_source(source))?;

        analyzer::analyze(&self.environment, &mut root)
            .map_err(|e| Error::from(e).with_source(source))?;

        let checker = analyzer::Checker::new(&self.environment);
        let root = pipeline
            .run_with_options(root, &checker, &options.rewrite_options())
            .map_err(|e| Error::from(e).with_source(source))?;

        Ok(CompiledExpression::new(
            root,
            String::from(source),
            &self.environment,
            self.options.default_execution_options.clone(),
        ))
    }
}
