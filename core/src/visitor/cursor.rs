use super::Violation;
use super::patch::install;
use crate::ast::{Node, SlotShape};
use crate::parser::Span;
use crate::types::{Type, TypeResolver};

/// A visitor's view of the node being visited and of the slot it lives in.
///
/// The node's children have been visited already and its type is resolved.
/// A visitor may replace the node through [`Cursor::patch`] or
/// [`Cursor::patch_with`], at most once per visit.
pub struct Cursor<'a> {
    node: &'a mut Node,
    shape: SlotShape,
    resolver: &'a dyn TypeResolver,
    patched: bool,
    violation: Option<Violation>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(node: &'a mut Node, shape: SlotShape, resolver: &'a dyn TypeResolver) -> Self {
        Self {
            node,
            shape,
            resolver,
            patched: false,
            violation: None,
        }
    }

    pub fn node(&self) -> &Node {
        self.node
    }

    /// Resolved type of the visited node.
    pub fn ty(&self) -> Option<&Type> {
        self.node.ty.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.node.span.as_ref()
    }

    /// Where the node sits in its parent.
    pub fn shape(&self) -> SlotShape {
        self.shape
    }

    pub fn resolver(&self) -> &dyn TypeResolver {
        self.resolver
    }

    /// Replace the visited node with `replacement`.
    pub fn patch(&mut self, replacement: Node) {
        if self.claim() {
            let span = self.node.span.clone();
            install(self.node, replacement, span);
        }
    }

    /// Replace the visited node with a node built around it.
    ///
    /// `build` receives the current node by value, so the replacement can
    /// embed it without cloning.
    pub fn patch_with(&mut self, build: impl FnOnce(Node) -> Node) {
        if self.claim() {
            let span = self.node.span.clone();
            let current = core::mem::replace(self.node, Node::nil());
            install(self.node, build(current), span);
        }
    }

    pub fn is_patched(&self) -> bool {
        self.patched
    }

    fn claim(&mut self) -> bool {
        if self.patched {
            self.violation.get_or_insert(Violation::DoublePatch);
            return false;
        }
        self.patched = true;
        true
    }

    pub(crate) fn finish(self) -> (bool, Option<Violation>) {
        (self.patched, self.violation)
    }
}
