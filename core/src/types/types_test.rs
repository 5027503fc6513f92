use pretty_assertions::assert_eq;

use super::*;
use crate::analyzer::TypeErrorKind;
use crate::{ToString, vec};

#[test]
fn test_basic_types_are_named_after_their_kind() {
    for kind in [Kind::Int, Kind::Int16, Kind::Uint8, Kind::Float32, Kind::String, Kind::Bool] {
        let ty = Type::basic(kind);
        assert_eq!(ty.name(), kind.as_str());
        assert!(!ty.is_named(), "{} should be basic", ty);
    }
}

#[test]
fn test_named_type_discriminator() {
    let named = Type::named("namedIntType", Kind::Int16);
    assert!(named.is_named());
    assert_eq!(named.kind(), Kind::Int16);
    assert_eq!(named.underlying(), Type::basic(Kind::Int16));

    // A declared name equal to the kind's canonical text is indistinguishable
    // from the basic type.
    assert!(!Type::named("int16", Kind::Int16).is_named());
    assert_eq!(Type::named("int16", Kind::Int16), Type::basic(Kind::Int16));
}

#[test]
fn test_kind_families() {
    assert!(Kind::Int8.is_signed() && !Kind::Int8.is_unsigned());
    assert!(Kind::Uint64.is_unsigned() && Kind::Uint64.is_integer());
    assert!(Kind::Float32.is_float() && Kind::Float32.is_numeric());
    assert!(Kind::String.is_primitive());
    assert!(!Kind::Bool.is_primitive());
    assert!(!Kind::Array.is_numeric());
    assert!(!Kind::Interface.is_primitive());
}

#[test]
fn test_type_display() {
    assert_eq!(Type::int().to_string(), "int");
    assert_eq!(Type::float().to_string(), "float64");
    assert_eq!(Type::any().to_string(), "interface");
    assert_eq!(
        Type::named("namedFloatType", Kind::Float32).to_string(),
        "namedFloatType (float32)"
    );
}

#[test]
fn test_signature_display() {
    let sig = Signature::new(vec![Type::int(), Type::string()], Type::bool());
    assert_eq!(sig.to_string(), "func(int, string) bool");

    let sig = Signature::variadic(vec![Type::any()], Type::any()).with_returns(Returns::UnderlyingOf(0));
    assert_eq!(sig.to_string(), "func(...interface) underlying($0)");
}

#[test]
fn test_param_for_variadic() {
    let sig = Signature::variadic(vec![Type::string(), Type::int()], Type::bool());
    assert_eq!(sig.required(), 1);
    assert_eq!(sig.param_for(0), Some(&Type::string()));
    assert_eq!(sig.param_for(1), Some(&Type::int()));
    assert_eq!(sig.param_for(7), Some(&Type::int()));

    let sig = Signature::new(vec![Type::string()], Type::bool());
    assert_eq!(sig.param_for(1), None);
}

#[test]
fn test_resolve_call_result_declared() {
    let named = Type::named("namedIntType", Kind::Int16);
    let sig = Signature::new(vec![], named.clone());
    assert_eq!(resolve_call_result("namedInt", &sig, &[], None), Ok(named));
}

#[test]
fn test_resolve_call_result_variadic_any_accepts_every_kind() {
    let sig = Signature::variadic(vec![Type::any()], Type::bool());
    let args = [
        Type::int(),
        Type::named("namedStringType", Kind::String),
        Type::basic(Kind::Array),
    ];
    assert_eq!(resolve_call_result("f", &sig, &args, None), Ok(Type::bool()));
}

#[test]
fn test_resolve_call_result_arity() {
    let sig = Signature::new(vec![Type::int()], Type::int());
    let err = resolve_call_result("f", &sig, &[], Some(&crate::parser::Span(3..6))).unwrap_err();
    assert_eq!(
        err.kind,
        TypeErrorKind::ArgumentCountMismatch {
            callee: "f".to_string(),
            expected: 1,
            found: 0,
            variadic: false,
        }
    );
    assert_eq!(err.span, Some(crate::parser::Span(3..6)));
}

#[test]
fn test_resolve_call_result_argument_mismatch() {
    let sig = Signature::new(vec![Type::int()], Type::int());
    let err = resolve_call_result("f", &sig, &[Type::named("MyInt", Kind::Int)], None).unwrap_err();
    assert!(matches!(err.kind, TypeErrorKind::ArgumentMismatch { index: 0, .. }));
}
