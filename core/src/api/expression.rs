//! Compiled expressions.

use super::environment::Environment;
use super::{Error, ExecutionOptions};
use crate::ast::Node;
use crate::evaluator;
use crate::values::Value;
use crate::String;

/// A compiled expression ready for execution.
///
/// Compiled expressions borrow the Engine's environment and can be executed
/// multiple times. The tree they hold is the typed tree after every rewrite
/// rule of the pipeline has run.
///
/// # Example
///
/// ```ignore
/// let expr = engine.compile("basicInt() == 42", &mut Pipeline::new())?;
/// assert_eq!(expr.run()?, Value::Bool(true));
/// ```
#[derive(Debug)]
pub struct CompiledExpression<'e> {
    /// The typed, rewritten tree
    root: Node,

    /// Source text the tree was parsed from, for error reporting
    source: String,

    /// Global environment for evaluation
    env: &'e Environment,

    /// Runtime options (max_depth)
    options: ExecutionOptions,
}

impl<'e> CompiledExpression<'e> {
    /// Create a new compiled expression.
    ///
    /// This is called internally by Engine::compile().
    pub(crate) fn new(
        root: Node,
        source: String,
        env: &'e Environment,
        options: ExecutionOptions,
    ) -> Self {
        Self {
            root,
            source,
            env,
            options,
        }
    }

    /// The rewritten tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Take ownership of the rewritten tree.
    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Execute with the engine's default execution options.
    pub fn run(&self) -> Result<Value, Error> {
        self.run_with(&self.options)
    }

    /// Execute with explicit execution options.
    pub fn run_with(&self, options: &ExecutionOptions) -> Result<Value, Error> {
        evaluator::eval_with_options(self.env, &self.root, options)
            .map_err(|e| Error::from(e).with_source(&self.source))
    }
}
