//! Type descriptors, call signatures and the resolver hook.

pub mod resolver;
pub mod signature;
#[allow(clippy::module_inception)]
pub mod types;

pub use resolver::{TypeResolver, resolve_call_result, resolve_tree, type_of};
pub use signature::{Returns, Signature};
pub use types::{Kind, Type};

#[cfg(test)]
mod types_test;
