//! In-place node replacement.

use crate::ast::{Node, Slot};
use crate::parser::Span;

/// Replace the occupant of `slot` with `replacement`.
///
/// The replacement takes over the old occupant's location when it has none
/// of its own, and its cached type is dropped so that the next lookup
/// recomputes it against its new children. Types cached on descendants of
/// the replacement are kept. Returns the previous occupant, if any.
pub fn patch(slot: &mut Slot<'_>, replacement: Node) -> Option<Node> {
    let span = slot.span();
    slot.replace(prepare(replacement, span))
}

/// Overwrite `target` in place, keeping `span` as the fallback location.
pub(crate) fn install(target: &mut Node, replacement: Node, span: Option<Span>) -> Node {
    core::mem::replace(target, prepare(replacement, span))
}

fn prepare(mut replacement: Node, span: Option<Span>) -> Node {
    if replacement.span.is_none() {
        replacement.span = span;
    }
    replacement.ty = None;
    replacement.visited = 0;
    replacement
}
