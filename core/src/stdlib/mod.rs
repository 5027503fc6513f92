//! Builtin conversions and library callables.
//!
//! Builtins (`int`, `float`, `string`, `len`) are part of the language:
//! the parser turns calls to them into `BuiltinCall` nodes and they need no
//! registration. Library callables such as `unpack` are ordinary host
//! functions that an embedder registers through [`register_stdlib`].

use ecow::EcoString;

use crate::analyzer::{TypeError, TypeErrorKind};
use crate::api::{EnvironmentBuilder, Error};
use crate::evaluator::RuntimeError;
use crate::parser::Span;
use crate::types::{Kind, Returns, Signature, Type};
use crate::values::Value;
use crate::{String, ToString, format, vec};

/// Name of the callable inserted by the unwrap rule.
pub const UNPACK: &str = "unpack";

/// Names parsed as builtin calls.
pub const BUILTINS: &[&str] = &["int", "float", "string", "len"];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Register the library callables in the environment.
///
/// # Example
///
/// ```
/// use graft_core::api::{Engine, EngineOptions};
/// use graft_core::stdlib::register_stdlib;
///
/// let engine = Engine::new(EngineOptions::default(), |env| register_stdlib(env)).unwrap();
/// assert!(engine.environment().function("unpack").is_some());
/// ```
pub fn register_stdlib(env: &mut EnvironmentBuilder) -> Result<(), Error> {
    env.function(UNPACK, unpack_signature(), unpack)
}

/// `unpack(...any)`: the basic type underlying the first argument.
pub fn unpack_signature() -> Signature {
    Signature::variadic(vec![Type::any()], Type::any()).with_returns(Returns::UnderlyingOf(0))
}

/// Strip the named type off the first argument; extra arguments are ignored.
pub fn unpack(args: &[Value]) -> Result<Value, RuntimeError> {
    match args.first() {
        Some(value) => Ok(value.clone().into_basic()),
        None => Err(RuntimeError::InvalidArgument {
            callee: String::from(UNPACK),
            message: String::from("no arguments"),
        }),
    }
}

/// Result type of builtin `name` applied to arguments of the given types.
pub fn builtin_result(name: &str, args: &[Type], span: Option<&Span>) -> Result<Type, TypeError> {
    let error = |kind| TypeError::new(kind, span.cloned());

    if !is_builtin(name) {
        return Err(error(TypeErrorKind::UnknownBuiltin {
            name: name.to_string(),
        }));
    }
    let [arg] = args else {
        return Err(error(TypeErrorKind::ArgumentCountMismatch {
            callee: name.to_string(),
            expected: 1,
            found: args.len(),
            variadic: false,
        }));
    };

    let kind = arg.kind();
    let (accepted, expected, result) = match name {
        "int" => (
            kind.is_numeric() || kind == Kind::String,
            "number or string",
            Type::int(),
        ),
        "float" => (
            kind.is_numeric() || kind == Kind::String,
            "number or string",
            Type::float(),
        ),
        "string" => (
            kind.is_primitive() || kind == Kind::Bool,
            "number, string or bool",
            Type::string(),
        ),
        _ => (
            matches!(kind, Kind::String | Kind::Array | Kind::Map),
            "string, array or map",
            Type::int(),
        ),
    };

    if accepted || arg.is_any() {
        Ok(result)
    } else {
        Err(error(TypeErrorKind::ArgumentMismatch {
            callee: name.to_string(),
            index: 0,
            expected: expected.to_string(),
            found: arg.to_string(),
        }))
    }
}

/// Evaluate builtin `name`. Named arguments are converted from their
/// underlying value.
pub fn call_builtin(name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let [arg] = args else {
        return Err(invalid(name, format!("expected 1 argument, found {}", args.len())));
    };
    let arg = arg.clone().into_basic();

    match name {
        "int" => to_int(arg),
        "float" => to_float(arg),
        "string" => to_string(arg),
        "len" => match &arg {
            Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
            Value::Array(items) => Ok(Value::Int(items.len() as i64)),
            Value::Map(entries) => Ok(Value::Int(entries.len() as i64)),
            other => Err(invalid(name, format!("cannot take length of {}", other.type_name()))),
        },
        _ => Err(RuntimeError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

fn to_int(value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Int(i) => Ok(Value::Int(i)),
        Value::Uint(u) => i64::try_from(u)
            .map(Value::Int)
            .map_err(|_| cast(format!("{} does not fit in int", u))),
        Value::Float(x) if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 => {
            Ok(Value::Int(x as i64))
        }
        Value::Float(x) => Err(cast(format!("{} does not fit in int", x))),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| cast(format!("cannot parse {:?} as int", s.as_str()))),
        other => Err(invalid("int", format!("cannot convert {}", other.type_name()))),
    }
}

fn to_float(value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| cast(format!("cannot parse {:?} as float", s.as_str()))),
        other => match other.as_f64() {
            Some(x) => Ok(Value::Float(x)),
            None => Err(invalid("float", format!("cannot convert {}", other.type_name()))),
        },
    }
}

fn to_string(value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Str(s) => Ok(Value::Str(s)),
        Value::Int(_) | Value::Uint(_) | Value::Float(_) | Value::Bool(_) => {
            Ok(Value::Str(EcoString::from(value.to_string())))
        }
        other => Err(invalid("string", format!("cannot convert {}", other.type_name()))),
    }
}

fn invalid(callee: &str, message: String) -> RuntimeError {
    RuntimeError::InvalidArgument {
        callee: callee.to_string(),
        message,
    }
}

fn cast(message: String) -> RuntimeError {
    RuntimeError::CastError { message }
}
