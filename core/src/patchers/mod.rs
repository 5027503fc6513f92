//! Built-in rewrite rules for values of named types.
//!
//! Both rules match the same nodes: those whose type is a named type layered
//! over a numeric or string kind. They differ in what they wrap the node in.

mod basic_cast;
mod unpack;

pub use basic_cast::BasicCastPatcher;
pub use unpack::UnpackPatcher;

use crate::types::Type;

/// Whether `ty` is a declared type over a number or string representation.
///
/// A type is basic exactly when its name is the canonical name of its
/// kind; every other name marks a named type.
pub fn needs_unwrap(ty: &Type) -> bool {
    ty.kind().is_primitive() && ty.is_named()
}

#[cfg(test)]
mod tests;
