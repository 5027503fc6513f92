use super::needs_unwrap;
use crate::ast::Node;
use crate::stdlib::UNPACK;
use crate::vec;
use crate::visitor::{Cursor, Visitor};

/// Wraps every named-type node as `unpack(node)`.
///
/// The wrapping call resolves to the basic type underlying its argument, so
/// the replacement no longer matches and the rule stops there. Compiling
/// with this rule requires `unpack` to be registered in the environment
/// (see [`crate::stdlib::register_stdlib`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnpackPatcher;

impl Visitor for UnpackPatcher {
    fn visit(&mut self, cursor: &mut Cursor<'_>) {
        if !cursor.ty().is_some_and(needs_unwrap) {
            return;
        }
        cursor.patch_with(|node| Node::call(UNPACK, vec![node]));
    }

    fn name(&self) -> &str {
        "unpack"
    }
}
