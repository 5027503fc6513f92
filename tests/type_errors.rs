/*
 * Error Reporting Tests
 *
 * Compile-time and run-time failures, checked by the header line of the
 * rendered report.
 */

#[macro_use]
mod cases;

test_case! {
    name: undefined_variable,
    input: "missing + 1",
    error: { "[E001] Error: Undefined variable 'missing'" },
}

test_case! {
    name: unpack_needs_an_argument,
    input: "unpack() == 1",
    error: { "[E005] Error: 'unpack' expects at least 1 argument(s), found 0" },
}

test_case! {
    name: mismatched_operands,
    input: r#"1 + "x""#,
    error: { "[E007] Error: Invalid operation: int + string" },
}

test_case! {
    name: unpacked_operand_keeps_its_kind,
    input: r#"unpack(namedInt()) + "x""#,
    rule: "none",
    error: { "[E007] Error: Invalid operation: int16 + string" },
}

test_case! {
    name: condition_must_be_bool,
    input: "if 1 { 2 } else { 3 }",
    error: { "[E009] Error: Condition has type int, expected bool" },
}

test_case! {
    name: named_arithmetic_fails_at_run_time_without_rules,
    input: "namedInt() + 1 == 43",
    rule: "none",
    error: { "Error: Invalid operation: namedIntType + int" },
}

test_case! {
    name: division_by_zero,
    input: "basicInt() / 0",
    error: { "Error: Division by zero" },
}
