//! Binary operator implementations over basic values.
//!
//! Values of named types are rejected here: arithmetic and ordering only
//! apply to bare representations.

use core::cmp::Ordering;

use ecow::EcoString;

use super::RuntimeError;
use crate::ToString;
use crate::parser::BinaryOp;
use crate::values::Value;

/// Evaluate a binary operation on two integers.
///
/// Overflow is reported rather than wrapped. Division by zero returns an
/// error.
pub(super) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<i64, RuntimeError> {
    let result = match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        BinaryOp::Div | BinaryOp::Rem if right == 0 => return Err(RuntimeError::DivisionByZero),
        // i64::MIN / -1 is the only overflowing division
        BinaryOp::Div => left.checked_div(right),
        BinaryOp::Rem => left.checked_rem(right),
        _ => return Err(operands(op, &Value::Int(left), &Value::Int(right))),
    };
    result.ok_or(RuntimeError::IntegerOverflow { op: op.as_str() })
}

/// Evaluate a binary operation on two unsigned integers.
pub(super) fn eval_binary_uint(op: BinaryOp, left: u64, right: u64) -> Result<u64, RuntimeError> {
    let result = match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        BinaryOp::Div | BinaryOp::Rem if right == 0 => return Err(RuntimeError::DivisionByZero),
        BinaryOp::Div => left.checked_div(right),
        BinaryOp::Rem => left.checked_rem(right),
        _ => return Err(operands(op, &Value::Uint(left), &Value::Uint(right))),
    };
    result.ok_or(RuntimeError::IntegerOverflow { op: op.as_str() })
}

/// Evaluate a binary operation on two floats.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than panicking).
pub(super) fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> Result<f64, RuntimeError> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div => Ok(left / right), // Division by zero produces inf
        BinaryOp::Rem => Ok(left % right),
        _ => Err(operands(op, &Value::Float(left), &Value::Float(right))),
    }
}

/// `+ - * / %` over any pair of values.
///
/// Two signed or two unsigned integers stay in their family; a signed and
/// an unsigned integer meet as signed; anything involving a float is a
/// float. `+` also concatenates strings.
pub(super) fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_binary_int(op, *a, *b).map(Value::Int),
        (Value::Uint(a), Value::Uint(b)) => eval_binary_uint(op, *a, *b).map(Value::Uint),
        (Value::Int(a), Value::Uint(b)) => eval_binary_int(op, *a, to_signed(op, *b)?).map(Value::Int),
        (Value::Uint(a), Value::Int(b)) => eval_binary_int(op, to_signed(op, *a)?, *b).map(Value::Int),
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = EcoString::from(a.as_str());
            joined.push_str(b);
            Ok(Value::Str(joined))
        }
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => eval_binary_float(op, a, b).map(Value::Float),
            _ => Err(operands(op, left, right)),
        },
    }
}

/// `< <= > >=` over two numbers or two strings.
pub(super) fn ordering(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let order = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(operands(op, left, right)),
        },
    };

    // NaN compares false against everything
    let Some(order) = order else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => order == Ordering::Less,
        BinaryOp::Le => order != Ordering::Greater,
        BinaryOp::Gt => order == Ordering::Greater,
        BinaryOp::Ge => order != Ordering::Less,
        _ => return Err(operands(op, left, right)),
    };
    Ok(Value::Bool(result))
}

fn to_signed(op: BinaryOp, value: u64) -> Result<i64, RuntimeError> {
    i64::try_from(value).map_err(|_| RuntimeError::IntegerOverflow { op: op.as_str() })
}

pub(super) fn operands(op: BinaryOp, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::InvalidOperands {
        op: op.as_str(),
        left: left.type_name().to_string(),
        right: right.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Kind, Type};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_int_add() {
        assert_eq!(eval_binary_int(BinaryOp::Add, 5, 3), Ok(8));
    }

    #[test]
    fn test_int_div_truncates() {
        assert_eq!(eval_binary_int(BinaryOp::Div, 7, 2), Ok(3));
        assert_eq!(eval_binary_int(BinaryOp::Rem, -7, 2), Ok(-1));
    }

    #[test]
    fn test_int_div_by_zero() {
        assert_eq!(eval_binary_int(BinaryOp::Div, 10, 0), Err(RuntimeError::DivisionByZero));
        assert_eq!(eval_binary_int(BinaryOp::Rem, 10, 0), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_int_overflow() {
        assert_eq!(
            eval_binary_int(BinaryOp::Add, i64::MAX, 1),
            Err(RuntimeError::IntegerOverflow { op: "+" })
        );
        assert_eq!(
            eval_binary_int(BinaryOp::Div, i64::MIN, -1),
            Err(RuntimeError::IntegerOverflow { op: "/" })
        );
        assert_eq!(
            eval_binary_uint(BinaryOp::Sub, 1, 2),
            Err(RuntimeError::IntegerOverflow { op: "-" })
        );
    }

    #[test]
    fn test_float_div_by_zero() {
        let result = eval_binary_float(BinaryOp::Div, 10.0, 0.0).unwrap();
        assert!(result.is_infinite());
    }

    #[test]
    fn test_mixed_arithmetic() {
        assert_eq!(
            arithmetic(BinaryOp::Add, &Value::Int(1), &Value::Float(0.5)),
            Ok(Value::Float(1.5))
        );
        assert_eq!(
            arithmetic(BinaryOp::Sub, &Value::Uint(3), &Value::Int(5)),
            Ok(Value::Int(-2))
        );
        assert_eq!(
            arithmetic(BinaryOp::Add, &Value::str("ab"), &Value::str("c")),
            Ok(Value::str("abc"))
        );
    }

    #[test]
    fn test_named_operands_are_rejected() {
        let named = Value::named(Type::named("namedIntType", Kind::Int16), Value::Int(42));
        assert_eq!(
            arithmetic(BinaryOp::Add, &named, &Value::Int(1)),
            Err(RuntimeError::InvalidOperands {
                op: "+",
                left: "namedIntType".into(),
                right: "int".into(),
            })
        );
        assert!(ordering(BinaryOp::Lt, &named, &Value::Int(1)).is_err());
    }

    #[test]
    fn test_ordering() {
        assert_eq!(ordering(BinaryOp::Lt, &Value::Int(1), &Value::Float(1.5)), Ok(Value::Bool(true)));
        assert_eq!(ordering(BinaryOp::Ge, &Value::str("b"), &Value::str("a")), Ok(Value::Bool(true)));
        assert_eq!(
            ordering(BinaryOp::Le, &Value::Float(f64::NAN), &Value::Float(1.0)),
            Ok(Value::Bool(false))
        );
    }
}
