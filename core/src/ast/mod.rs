//! The typed syntax tree rewritten by the visitor pipeline.

mod display;
mod node;
mod slot;

pub use node::{Literal, MapEntry, Node, NodeKind};
pub use slot::{Slot, SlotShape};

pub(crate) use display::format_float;
