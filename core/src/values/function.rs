//! Host function representation.
//!
//! Functions registered with the environment pair a call [`Signature`]
//! (used by the analyzer) with a native implementation (used by the
//! evaluator).

use core::fmt;

use super::Value;
use crate::evaluator::RuntimeError;
use crate::types::Signature;

/// Type alias for native function pointers.
///
/// This is the signature expected for Rust functions that will be called
/// from expressions. Arguments arrive already evaluated, in call order.
///
/// # Example
///
/// ```
/// use graft_core::evaluator::RuntimeError;
/// use graft_core::values::Value;
///
/// fn double(args: &[Value]) -> Result<Value, RuntimeError> {
///     match args {
///         [Value::Int(i)] => Ok(Value::Int(i * 2)),
///         _ => Err(RuntimeError::InvalidArgument {
///             callee: "double".into(),
///             message: "expected one int".into(),
///         }),
///     }
/// }
/// # assert_eq!(double(&[Value::Int(2)]), Ok(Value::Int(4)));
/// ```
pub type NativeFn = fn(args: &[Value]) -> Result<Value, RuntimeError>;

/// Wrapper pairing a native function pointer with its signature.
#[derive(Clone)]
pub struct NativeFunction {
    signature: Signature,
    func: NativeFn,
}

impl NativeFunction {
    /// Create a new native function with its type signature.
    pub fn new(signature: Signature, func: NativeFn) -> Self {
        Self { signature, func }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
