use super::needs_unwrap;
use crate::ast::Node;
use crate::vec;
use crate::visitor::{Cursor, Visitor};

/// Wraps every named-type node in the builtin conversion of its kind
/// family: `int(..)` for integers, `float(..)` for floats and `string(..)`
/// for strings.
///
/// Unlike [`super::UnpackPatcher`] this needs nothing registered; the
/// conversions are builtins.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCastPatcher;

impl Visitor for BasicCastPatcher {
    fn visit(&mut self, cursor: &mut Cursor<'_>) {
        let Some(ty) = cursor.ty().filter(|ty| needs_unwrap(ty)) else {
            return;
        };
        let kind = ty.kind();
        let builtin = if kind.is_integer() {
            "int"
        } else if kind.is_float() {
            "float"
        } else {
            "string"
        };
        tracing::trace!(builtin, from = %ty, "casting named value");
        cursor.patch_with(|node| Node::builtin(builtin, vec![node]));
    }

    fn name(&self) -> &str {
        "cast"
    }
}
