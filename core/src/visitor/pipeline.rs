//! Ordered application of visitors to a tree.

use super::walker::Walker;
use super::{RewriteError, Visitor};
use crate::ast::Node;
use crate::types::{TypeResolver, resolve_tree};
use crate::{Box, Vec};

/// Knobs for a rewrite run.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// How many times a single node may be patched within one pass.
    pub max_revisits: u32,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self { max_revisits: 16 }
    }
}

/// An ordered list of visitors, run one full pass each.
///
/// # Example
///
/// ```
/// use graft_core::patchers::UnpackPatcher;
/// use graft_core::visitor::Pipeline;
///
/// let pipeline = Pipeline::new().with(UnpackPatcher::default());
/// assert_eq!(pipeline.names(), vec!["unpack"]);
/// ```
#[derive(Default)]
pub struct Pipeline {
    visitors: Vec<Box<dyn Visitor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visitor; visitors run in the order they were added.
    pub fn with(mut self, visitor: impl Visitor + 'static) -> Self {
        self.push(visitor);
        self
    }

    pub fn push(&mut self, visitor: impl Visitor + 'static) {
        self.visitors.push(Box::new(visitor));
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.visitors.iter().map(|visitor| visitor.name()).collect()
    }

    pub fn run(&mut self, root: Node, resolver: &dyn TypeResolver) -> Result<Node, RewriteError> {
        self.run_with_options(root, resolver, &RewriteOptions::default())
    }

    pub fn run_with_options(
        &mut self,
        root: Node,
        resolver: &dyn TypeResolver,
        options: &RewriteOptions,
    ) -> Result<Node, RewriteError> {
        let mut visitors: Vec<&mut dyn Visitor> = self
            .visitors
            .iter_mut()
            .map(|visitor| &mut **visitor as &mut dyn Visitor)
            .collect();
        run(root, &mut visitors, resolver, options)
    }
}

/// Resolve the tree, then give each visitor one full post-order pass.
///
/// Types are brought up to date before the first visitor and after every
/// pass, so each visitor sees a fully typed tree. The (possibly replaced)
/// root is returned; on error the tree is dropped.
pub fn run(
    mut root: Node,
    visitors: &mut [&mut dyn Visitor],
    resolver: &dyn TypeResolver,
    options: &RewriteOptions,
) -> Result<Node, RewriteError> {
    root.clear_marks();
    resolve_tree(resolver, &mut root)?;

    for (index, visitor) in visitors.iter_mut().enumerate() {
        let pass = index as u32 + 1;
        let mut walker = Walker::new(&mut **visitor, resolver, pass, options.max_revisits);
        walker.walk(&mut root)?;
        let patches = walker.patches;
        resolve_tree(resolver, &mut root).map_err(|e| walker.resolution(e))?;
        tracing::debug!(rule = visitor.name(), pass, patches, "rewrite pass complete");
    }

    Ok(root)
}

/// Run a single visitor over the tree rooted at `root`, in place.
pub fn walk(
    root: &mut Node,
    visitor: &mut dyn Visitor,
    resolver: &dyn TypeResolver,
) -> Result<(), RewriteError> {
    root.clear_marks();
    resolve_tree(resolver, root)?;
    let mut walker = Walker::new(visitor, resolver, 1, RewriteOptions::default().max_revisits);
    walker.walk(root)?;
    resolve_tree(resolver, root).map_err(|e| walker.resolution(e))?;
    Ok(())
}
