//! Unit tests for the interpreter module.

use crate::{
    ast::{ast::AbstractSyntaxTree, types::TypeBinding},
    errors::errors::FatalError,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

use super::{
    interpreter::Interpreter,
    value::{Value, BINARY_IMPLEMENTATIONS, UNARY_IMPLEMENTATIONS},
};

fn parse_source(source: &str) -> AbstractSyntaxTree {
    let (scanner, lexical) = tokenize(source);
    assert!(lexical.is_empty(), "unexpected lexical errors: {:?}", lexical);
    let (ast, syntax) = parse(scanner).unwrap();
    assert!(syntax.is_empty(), "unexpected syntax errors: {:?}", syntax);
    ast
}

/// Runs a program without semantic analysis.
fn execute(source: &str, input: &str) -> Result<String, FatalError> {
    let ast = parse_source(source);
    let mut interpreter = Interpreter::new(input.as_bytes(), Vec::new());
    interpreter.run(&ast)?;

    Ok(String::from_utf8(interpreter.into_output()).unwrap())
}

/// Runs a program that must pass semantic analysis.
fn run(source: &str, input: &str) -> Result<String, FatalError> {
    let semantic = type_check(&parse_source(source));
    assert!(semantic.is_empty(), "unexpected semantic errors: {:?}", semantic);
    execute(source, input)
}

#[test]
fn test_sum_of_range() {
    let source = "var n : int := 5;\nvar s : int := 0;\nvar i : int;\nfor i in 1..n do s := s + i; end for;\nprint s;";
    assert_eq!(run(source, "").unwrap(), "15");
}

#[test]
fn test_precedence_in_evaluation() {
    assert_eq!(run("print 1 + 2 * 3;", "").unwrap(), "7");
    assert_eq!(run("print 1 * 2 + 3;", "").unwrap(), "5");
    assert_eq!(run("print 8 - 4 - 2;", "").unwrap(), "2");
    assert_eq!(run("print !true & false;", "").unwrap(), "false");
    assert_eq!(run("print (1 + 2) * 3;", "").unwrap(), "9");
}

#[test]
fn test_zero_values() {
    let source = "var a : int;\nvar b : string;\nvar c : bool;\nprint a;\nprint b;\nprint c;";
    assert_eq!(run(source, "").unwrap(), "0false");
}

#[test]
fn test_print_writes_no_separator() {
    assert_eq!(run("print \"a\\n\";\nprint 1;\nprint true;", "").unwrap(), "a\n1true");
}

#[test]
fn test_string_operations() {
    let source = "var s : string := \"ab\" + \"cd\";\nprint s;\nprint s = \"abcd\";\nprint s = \"ab\";";
    assert_eq!(run(source, "").unwrap(), "abcdtruefalse");
}

#[test]
fn test_integer_comparison_and_division() {
    assert_eq!(run("print 1 < 2;\nprint 2 < 1;\nprint 3 = 3;", "").unwrap(), "truefalsetrue");
    assert_eq!(run("print 7 / 2;\nprint 0 - 7 / 2;", "").unwrap(), "3-3");
}

#[test]
fn test_integer_arithmetic_wraps() {
    assert_eq!(run("print 9223372036854775807 + 1;", "").unwrap(), "-9223372036854775808");
}

#[test]
fn test_division_by_zero_is_fatal() {
    let result = run("var z : int;\nprint 1 / z;", "");
    assert!(matches!(result, Err(FatalError::DivisionByZero { line: 2, column: 9 })));
}

#[test]
fn test_empty_range_skips_the_body() {
    let source = "var i : int;\nfor i in 3..1 do print i; end for;\nprint i;";
    assert_eq!(run(source, "").unwrap(), "0");
}

#[test]
fn test_loop_variable_keeps_last_value() {
    let source = "var i : int;\nfor i in 1..3 do print i; end for;\nprint i;";
    assert_eq!(run(source, "").unwrap(), "1233");
}

#[test]
fn test_loop_bounds_are_evaluated_once() {
    let source = "var n : int := 3;\nvar i : int;\nfor i in 1..n do n := 1; print i; end for;";
    assert_eq!(run(source, "").unwrap(), "123");
}

#[test]
fn test_nested_loops() {
    let source = "var i : int;\nvar j : int;\nfor i in 1..2 do for j in 1..i do print j; end for; end for;";
    assert_eq!(run(source, "").unwrap(), "112");
}

#[test]
fn test_declaration_in_loop_body_starts_over_each_iteration() {
    let source = "var i : int;\nfor i in 1..3 do var x : int; x := x + i; print x; end for;";
    assert_eq!(run(source, "").unwrap(), "123");

    let source = "var i : int;\nfor i in 1..2 do var x : int := i; print x; end for;";
    assert_eq!(run(source, "").unwrap(), "12");
}

#[test]
fn test_redeclaration_outside_a_loop_is_fatal() {
    let result = execute("var x : int;\nvar x : int;", "");
    assert!(matches!(result, Err(FatalError::RedeclaredAtRuntime { ref variable }) if variable == "x"));
}

#[test]
fn test_failed_assertion_reports_its_source() {
    let source = "var x : int := 2;\nassert (x = 1 + 2);\nassert (x = 2);";
    assert_eq!(run(source, "").unwrap(), "Assertion near line 2 column 1 failed: x = 1 + 2\n");
}

#[test]
fn test_read_converts_to_the_declared_type() {
    let source = "var a : int;\nvar s : string;\nvar b : bool;\nread a;\nread s;\nread b;\nprint a + 1;\nprint s;\nprint b;";
    assert_eq!(run(source, "  41 hello\n\ttrue").unwrap(), "42hellotrue");
}

#[test]
fn test_read_past_end_of_input_is_fatal() {
    let result = run("var a : int;\nread a;\nread a;", "7\n");
    assert!(matches!(result, Err(FatalError::InputExhausted)));
}

#[test]
fn test_read_rejects_malformed_input() {
    let result = run("var a : int;\nread a;", "seven");
    assert!(matches!(
        result,
        Err(FatalError::InvalidInput { ref input, binding: TypeBinding::Integer }) if input == "seven"
    ));

    let result = run("var b : bool;\nread b;", "yes");
    assert!(matches!(result, Err(FatalError::InvalidInput { binding: TypeBinding::Boolean, .. })));
}

#[test]
fn test_undeclared_variable_at_runtime() {
    let result = execute("x := 1;", "");
    assert!(matches!(result, Err(FatalError::UndeclaredAtRuntime { ref variable }) if variable == "x"));
}

#[test]
fn test_type_mismatch_at_runtime_does_not_store_the_value() {
    let result = execute("var x : int := \"a\";", "");
    assert!(matches!(
        result,
        Err(FatalError::TypeAssertion { expected: TypeBinding::Integer, received: TypeBinding::String })
    ));

    let result = execute("print 1 + \"a\";", "");
    assert!(matches!(result, Err(FatalError::TypeAssertion { .. })));
}

#[test]
fn test_assignment_to_locked_variable_at_runtime() {
    let result = execute("var i : int;\nfor i in 1..2 do i := 5; end for;", "");
    assert!(matches!(result, Err(FatalError::LockedAtRuntime { ref variable }) if variable == "i"));
}

#[test]
fn test_every_transition_has_an_implementation() {
    let mut transitions = 0;

    for binding in TypeBinding::ALL {
        for (operator, _) in binding.transitions() {
            transitions += 1;
            if operator.is_unary() {
                assert!(UNARY_IMPLEMENTATIONS.contains_key(&(binding, operator)), "{} {}", binding, operator);
            } else {
                assert!(BINARY_IMPLEMENTATIONS.contains_key(&(binding, operator)), "{} {}", binding, operator);
            }
        }
    }

    assert_eq!(BINARY_IMPLEMENTATIONS.len() + UNARY_IMPLEMENTATIONS.len(), transitions);
}

#[test]
fn test_value_conversions() {
    assert_eq!(Value::zero(TypeBinding::String), Value::Str(String::new()));
    assert_eq!(Value::parse(TypeBinding::Integer, "-12"), Some(Value::Int(-12)));
    assert_eq!(Value::parse(TypeBinding::Integer, "12a"), None);
    assert_eq!(Value::parse(TypeBinding::Boolean, "false"), Some(Value::Bool(false)));
    assert_eq!(Value::parse(TypeBinding::Boolean, "True"), None);
    assert_eq!(Value::Bool(true).binding(), TypeBinding::Boolean);
    assert_eq!(Value::Str(String::from("quoted")).to_string(), "quoted");
}
