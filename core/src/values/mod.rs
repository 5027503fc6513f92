pub mod function;
pub mod value;

pub use function::{NativeFn, NativeFunction};
pub use value::Value;
