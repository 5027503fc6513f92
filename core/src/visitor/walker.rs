//! Post-order traversal with in-place patching.

use super::{Cursor, RewriteError, Violation, Visitor};
use crate::ast::{Node, SlotShape};
use crate::analyzer::TypeError;
use crate::types::{TypeResolver, type_of};

pub(crate) struct Walker<'v, 'r> {
    visitor: &'v mut dyn Visitor,
    resolver: &'r dyn TypeResolver,
    pass: u32,
    max_revisits: u32,
    pub(crate) patches: usize,
}

impl<'v, 'r> Walker<'v, 'r> {
    /// `pass` must be non-zero and differ from every earlier pass since the
    /// tree's marks were last cleared.
    pub(crate) fn new(
        visitor: &'v mut dyn Visitor,
        resolver: &'r dyn TypeResolver,
        pass: u32,
        max_revisits: u32,
    ) -> Self {
        Self {
            visitor,
            resolver,
            pass,
            max_revisits,
            patches: 0,
        }
    }

    pub(crate) fn walk(&mut self, root: &mut Node) -> Result<(), RewriteError> {
        self.walk_node(root, SlotShape::Root)?;
        Ok(())
    }

    /// Visit `node` after all of its children.
    ///
    /// Returns whether anything in the subtree was replaced, in which case
    /// the caller's cached type is stale.
    fn walk_node(&mut self, node: &mut Node, shape: SlotShape) -> Result<bool, RewriteError> {
        // A node moved into a replacement has already been handled this pass.
        if node.visited == self.pass {
            return Ok(false);
        }

        let mut changed = self.walk_children(node)?;
        if changed {
            node.invalidate();
        }
        type_of(self.resolver, node).map_err(|e| self.resolution(e))?;
        node.visited = self.pass;

        let mut revisits = 0;
        loop {
            let mut cursor = Cursor::new(node, shape, self.resolver);
            self.visitor.visit(&mut cursor);
            let (patched, violation) = cursor.finish();
            if let Some(reason) = violation {
                return Err(self.violation(node, reason));
            }
            if !patched {
                break;
            }

            changed = true;
            self.patches += 1;
            tracing::trace!(rule = self.visitor.name(), %shape, node = %node, "patched");

            revisits += 1;
            if revisits > self.max_revisits {
                let limit = self.max_revisits;
                return Err(self.violation(node, Violation::RevisitLimit { limit }));
            }

            // Fresh nodes of the replacement get visited; moved ones are skipped.
            self.walk_children(node)?;
            type_of(self.resolver, node).map_err(|e| self.resolution(e))?;
            node.visited = self.pass;
        }

        Ok(changed)
    }

    fn walk_children(&mut self, node: &mut Node) -> Result<bool, RewriteError> {
        // Nodes built by a rule may lack a location; report the nearest one.
        let span = node.span.clone();
        let mut changed = false;
        for slot in node.slots() {
            let shape = slot.shape();
            if let Some(child) = slot.into_node() {
                changed |= self
                    .walk_node(child, shape)
                    .map_err(|e| e.or_span(span.as_ref()))?;
            }
        }
        Ok(changed)
    }

    pub(crate) fn resolution(&self, error: TypeError) -> RewriteError {
        RewriteError::RuleResolution {
            rule: self.visitor.name().into(),
            error,
        }
    }

    fn violation(&self, node: &Node, reason: Violation) -> RewriteError {
        RewriteError::PatchViolation {
            rule: self.visitor.name().into(),
            span: node.span.clone(),
            reason,
        }
    }
}
