use core::fmt;

use ecow::EcoString;

use crate::ast::format_float;
use crate::types::{Kind, Type};
use crate::{Box, Vec};

/// A runtime value.
///
/// Values of named types keep their declared type around them, so a
/// `Named` value is never equal to a bare basic value of the same
/// representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(EcoString),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    /// Reference to a registered function.
    Function(EcoString),
    Named { ty: Type, value: Box<Value> },
}

impl Value {
    pub fn str(value: impl Into<EcoString>) -> Self {
        Value::Str(value.into())
    }

    /// Wrap `value` as a value of the declared type `ty`.
    pub fn named(ty: Type, value: Value) -> Self {
        Value::Named {
            ty,
            value: Box::new(value),
        }
    }

    /// The bare representation, with every named-type layer removed.
    pub fn into_basic(self) -> Value {
        match self {
            Value::Named { value, .. } => value.into_basic(),
            other => other,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float64,
            Value::Str(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Function(_) => Kind::Func,
            Value::Named { ty, .. } => ty.kind(),
        }
    }

    /// Name of the value's type, as a type error would print it.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Named { ty, .. } => ty.name(),
            other => other.kind().as_str(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of a basic number, for mixed int/float arithmetic.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Equality as the `==` operator sees it.
    ///
    /// Basic numbers compare by value across int, uint and float. Anything
    /// else compares structurally, so a named value only equals a named
    /// value of the same declared type.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Int(a), Value::Uint(b)) | (Value::Uint(b), Value::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (
                Value::Int(_) | Value::Uint(_) | Value::Float(_),
                Value::Int(_) | Value::Uint(_) | Value::Float(_),
            ) => self.as_f64() == other.as_f64(),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .any(|(k, v)| k.loose_eq(key) && v.loose_eq(value))
                    })
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(x) => format_float(f, *x),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Function(name) => write!(f, "<function {}>", name),
            Value::Named { ty, value } => write!(f, "{}({})", ty.name(), value),
        }
    }
}
