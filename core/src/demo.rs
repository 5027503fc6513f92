//! A small environment of named- and basic-typed functions.
//!
//! Every primitive family appears twice: once returning a value of a named
//! type and once returning the same value with the basic type. The CLI
//! evaluates against this environment and the tests use it too.
//!
//! | name          | returns                              |
//! |---------------|--------------------------------------|
//! | `namedInt`    | `42` as `namedIntType` (int16)       |
//! | `basicInt`    | `42` as `int`                        |
//! | `namedFloat`  | `3.0` as `namedFloatType` (float32)  |
//! | `basicFloat`  | `3.0` as `float32`                   |
//! | `namedString` | `"abc"` as `namedStringType` (string)|
//! | `basicString` | `"abc"` as `string`                  |

use crate::Vec;
use crate::api::{EnvironmentBuilder, Error};
use crate::evaluator::RuntimeError;
use crate::types::{Kind, Signature, Type};
use crate::values::{NativeFn, Value};

pub fn named_int_type() -> Type {
    Type::named("namedIntType", Kind::Int16)
}

pub fn named_float_type() -> Type {
    Type::named("namedFloatType", Kind::Float32)
}

pub fn named_string_type() -> Type {
    Type::named("namedStringType", Kind::String)
}

fn named_int(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::named(named_int_type(), Value::Int(42)))
}

fn basic_int(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Int(42))
}

fn named_float(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::named(named_float_type(), Value::Float(3.0)))
}

fn basic_float(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Float(3.0))
}

fn named_string(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::named(named_string_type(), Value::str("abc")))
}

fn basic_string(_: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::str("abc"))
}

/// Register the demo functions and the standard library.
///
/// # Example
///
/// ```
/// use graft_core::api::{Engine, EngineOptions};
///
/// let engine = Engine::new(EngineOptions::default(), graft_core::demo::register).unwrap();
/// assert!(engine.environment().contains("namedInt"));
/// assert!(engine.environment().contains("unpack"));
/// ```
pub fn register(env: &mut EnvironmentBuilder) -> Result<(), Error> {
    crate::stdlib::register_stdlib(env)?;
    register_functions(env)
}

/// Register only the six demo functions.
pub fn register_functions(env: &mut EnvironmentBuilder) -> Result<(), Error> {
    let functions: [(&str, Type, NativeFn); 6] = [
        ("namedInt", named_int_type(), named_int),
        ("basicInt", Type::int(), basic_int),
        ("namedFloat", named_float_type(), named_float),
        ("basicFloat", Type::basic(Kind::Float32), basic_float),
        ("namedString", named_string_type(), named_string),
        ("basicString", Type::string(), basic_string),
    ];
    for (name, ret, func) in functions {
        env.function(name, Signature::new(Vec::new(), ret), func)?;
    }
    Ok(())
}
