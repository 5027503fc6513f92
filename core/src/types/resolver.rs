//! The hook through which the rewriting core asks for types.

use super::{Returns, Signature, Type};
use crate::analyzer::{TypeError, TypeErrorKind};
use crate::ast::Node;
use crate::parser::Span;
use crate::{String, ToString};

/// Computes node types on demand.
///
/// Implementations look at a node's kind and at the types already cached on
/// its children; they never modify the tree. Caching is done by [`type_of`].
pub trait TypeResolver {
    /// Type of `node`, given that every child of `node` is resolved.
    fn resolve(&self, node: &Node) -> Result<Type, TypeError>;

    /// Signature registered under `name`, looked up by string identity.
    fn signature_of(&self, name: &str) -> Option<&Signature>;

    /// Result type of calling `callee` with arguments of the given types.
    fn resolve_call_result(
        &self,
        callee: &str,
        signature: &Signature,
        args: &[Type],
        span: Option<&Span>,
    ) -> Result<Type, TypeError> {
        resolve_call_result(callee, signature, args, span)
    }
}

/// Cached type of `node`, computing and caching it when missing.
pub fn type_of<R: TypeResolver + ?Sized>(resolver: &R, node: &mut Node) -> Result<Type, TypeError> {
    if let Some(ty) = &node.ty {
        return Ok(ty.clone());
    }
    let ty = resolver.resolve(node)?;
    node.ty = Some(ty.clone());
    Ok(ty)
}

/// Force resolution of every node of the tree, children first.
///
/// A node whose child changed type is resolved again, so a type cleared
/// anywhere below is propagated up to the root.
pub fn resolve_tree<R: TypeResolver + ?Sized>(
    resolver: &R,
    node: &mut Node,
) -> Result<Type, TypeError> {
    let mut stale = false;
    for slot in node.slots() {
        if let Some(child) = slot.into_node() {
            let before = child.ty.clone();
            let after = resolve_tree(resolver, child)?;
            stale |= before.as_ref() != Some(&after);
        }
    }
    if stale {
        node.invalidate();
    }
    type_of(resolver, node)
}

/// Check `args` against `signature` and compute the call's result type.
///
/// Parameters of the `interface` kind accept any argument; in a variadic
/// signature the last parameter covers every trailing argument.
pub fn resolve_call_result(
    callee: &str,
    signature: &Signature,
    args: &[Type],
    span: Option<&Span>,
) -> Result<Type, TypeError> {
    let error = |kind| TypeError::new(kind, span.cloned());

    let required = signature.required();
    let arity_ok = if signature.variadic {
        args.len() >= required
    } else {
        args.len() == required
    };
    if !arity_ok {
        return Err(error(TypeErrorKind::ArgumentCountMismatch {
            callee: callee.to_string(),
            expected: required,
            found: args.len(),
            variadic: signature.variadic,
        }));
    }

    for (index, arg) in args.iter().enumerate() {
        let Some(param) = signature.param_for(index) else {
            continue;
        };
        if !Signature::accepts(param, arg) {
            return Err(error(TypeErrorKind::ArgumentMismatch {
                callee: callee.to_string(),
                index,
                expected: param.to_string(),
                found: arg.to_string(),
            }));
        }
    }

    match &signature.returns {
        Returns::Declared(ty) => Ok(ty.clone()),
        Returns::UnderlyingOf(index) => match args.get(*index) {
            Some(arg) => Ok(arg.underlying()),
            None => Err(error(TypeErrorKind::ArgumentCountMismatch {
                callee: String::from(callee),
                expected: index + 1,
                found: args.len(),
                variadic: signature.variadic,
            })),
        },
    }
}
