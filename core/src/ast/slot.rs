//! Child positions of a node.
//!
//! A [`Slot`] names *where* a child lives in its parent, independently of
//! the parent's kind: a fixed field, an element of an ordered child list, or
//! an optional field that may be empty. The tree walker and the patch
//! operation are written against slots only.

use core::fmt;

use super::Node;
use crate::Box;
use crate::parser::Span;

pub enum Slot<'a> {
    /// The root of the tree being rewritten.
    Root(&'a mut Node),
    /// A single-child field.
    Field(&'a mut Node),
    /// Position `index` of an ordered child sequence.
    Element { index: usize, node: &'a mut Node },
    /// A single-child field that may be empty.
    Optional(&'a mut Option<Box<Node>>),
}

/// The shape of a [`Slot`], without the borrow.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SlotShape {
    Root,
    Field,
    Element(usize),
    Optional,
}

impl fmt::Display for SlotShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotShape::Root => write!(f, "root"),
            SlotShape::Field => write!(f, "field"),
            SlotShape::Element(index) => write!(f, "element #{}", index),
            SlotShape::Optional => write!(f, "optional field"),
        }
    }
}

impl<'a> Slot<'a> {
    pub fn shape(&self) -> SlotShape {
        match self {
            Slot::Root(_) => SlotShape::Root,
            Slot::Field(_) => SlotShape::Field,
            Slot::Element { index, .. } => SlotShape::Element(*index),
            Slot::Optional(_) => SlotShape::Optional,
        }
    }

    /// Current occupant, `None` for an empty optional slot.
    pub fn get(&self) -> Option<&Node> {
        match self {
            Slot::Root(node) | Slot::Field(node) | Slot::Element { node, .. } => Some(&**node),
            Slot::Optional(node) => node.as_deref(),
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut Node> {
        match self {
            Slot::Root(node) | Slot::Field(node) | Slot::Element { node, .. } => {
                Some(&mut **node)
            }
            Slot::Optional(node) => node.as_deref_mut(),
        }
    }

    /// Consume the slot, keeping the borrow of its occupant.
    pub fn into_node(self) -> Option<&'a mut Node> {
        match self {
            Slot::Root(node) | Slot::Field(node) | Slot::Element { node, .. } => Some(node),
            Slot::Optional(node) => node.as_deref_mut(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }

    /// Location of the current occupant.
    pub fn span(&self) -> Option<Span> {
        self.get().and_then(|node| node.span.clone())
    }

    /// Put `node` in the slot and hand back whatever was there.
    ///
    /// This is the raw substitution; see [`crate::visitor::patch`] for the
    /// version that carries locations over and invalidates types.
    pub fn replace(&mut self, node: Node) -> Option<Node> {
        match self {
            Slot::Root(slot) | Slot::Field(slot) | Slot::Element { node: slot, .. } => {
                Some(core::mem::replace(&mut **slot, node))
            }
            Slot::Optional(slot) => slot.replace(Box::new(node)).map(|old| *old),
        }
    }
}
