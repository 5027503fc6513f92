//! Configuration options for the engine.

/// Configuration options for compilation.
///
/// These options control how the rewrite pipeline runs over a freshly
/// analyzed tree.
///
/// # Example
///
/// ```
/// use graft_core::api::CompilationOptions;
///
/// let options = CompilationOptions { max_revisits: 4 };
/// assert_eq!(options.rewrite_options().max_revisits, 4);
/// ```
#[derive(Debug, Clone)]
pub struct CompilationOptions {
    /// How many times a single node may be re-patched in one pass.
    ///
    /// A rule that keeps patching the node it just produced is reported as
    /// a patch violation once this many revisits have happened.
    ///
    /// Default: 16
    pub max_revisits: u32,
}

impl CompilationOptions {
    pub fn rewrite_options(&self) -> crate::visitor::RewriteOptions {
        crate::visitor::RewriteOptions {
            max_revisits: self.max_revisits,
        }
    }
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self { max_revisits: 16 }
    }
}

/// Configuration options for expression execution.
///
/// # Example
///
/// ```
/// use graft_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_depth: 500 };
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// Configuration options for the engine.
///
/// These options set the defaults for compilation and execution,
/// which can be overridden on a per-call basis.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Default options for compilation.
    ///
    /// These can be overridden when calling `Engine::compile_with()`.
    pub default_compilation_options: CompilationOptions,

    /// Default options for execution.
    ///
    /// These can be overridden when calling `CompiledExpression::run_with()`.
    pub default_execution_options: ExecutionOptions,
}
