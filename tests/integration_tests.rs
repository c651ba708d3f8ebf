//! Integration tests for end-to-end interpretation.
//!
//! These tests drive the complete pipeline from source text through
//! scanning, parsing, semantic analysis and execution, with in-memory input
//! and output.

use minilang::{
    ast::types::TypeBinding,
    errors::errors::{ErrorImpl, ErrorKind, FatalError},
    lexer::lexer::tokenize,
    parser::parser::parse,
    pipeline::{run, Outcome},
    render_error,
};

fn run_program(source: &str, input: &str) -> (Outcome, String) {
    let mut output: Vec<u8> = Vec::new();
    let outcome = run(source, input.as_bytes(), &mut output).unwrap();

    (outcome, String::from_utf8(output).unwrap())
}

#[test]
fn test_sum_program() {
    let source = "var n : int := 5;\nvar s : int := 0;\nvar i : int;\nfor i in 1..n do s := s + i; end for;\nprint s;\n";
    let (outcome, output) = run_program(source, "");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(output, "15");
}

#[test]
fn test_loop_variable_must_be_declared() {
    let source = "var n : int := 5;\nvar s : int := 0;\nfor i in 1..n do s := s + i; end for;\nprint s;\n";
    let (outcome, output) = run_program(source, "");

    match outcome {
        Outcome::Rejected { kind, errors } => {
            assert_eq!(kind, ErrorKind::Semantic);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].get_impl(), &ErrorImpl::UndeclaredVariable { variable: String::from("i") });
            assert_eq!(errors[0].get_position(), Some((3, 5)));
        }
        Outcome::Completed => panic!("program should have been rejected"),
    }
    assert!(output.is_empty());
}

#[test]
fn test_string_loop_variable_is_rejected_before_execution() {
    let (outcome, output) = run_program("var s : string;\nfor s in 1..2 do print 1; end for;", "");

    match outcome {
        Outcome::Rejected { kind, errors } => {
            assert_eq!(kind, ErrorKind::Semantic);
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].get_impl(),
                &ErrorImpl::TypeMatchError {
                    expected: TypeBinding::Integer,
                    received: TypeBinding::String,
                }
            );
        }
        Outcome::Completed => panic!("program should have been rejected"),
    }
    assert!(output.is_empty());
}

#[test]
fn test_declaration_inside_loop_runs_every_iteration() {
    let source = "var i : int;\nfor i in 1..2 do var x : int := i; print x; end for;";
    let (outcome, output) = run_program(source, "");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(output, "12");
}

#[test]
fn test_factorial_with_input() {
    let source = r#"
var nTimes : int := 0;
print "How many times?";
read nTimes;
var x : int;
var f : int := 1;
for x in 1..nTimes do
    f := f * x;
end for;
print "\nfactorial: ";
print f;
assert (f = 120);
"#;
    let (outcome, output) = run_program(source, "5\n");

    assert!(outcome.is_completed());
    assert_eq!(output, "How many times?\nfactorial: 120");
}

#[test]
fn test_undeclared_variable_stops_before_execution() {
    let (outcome, output) = run_program("x := 1;\nprint \"never\";", "");

    match outcome {
        Outcome::Rejected { kind, errors } => {
            assert_eq!(kind, ErrorKind::Semantic);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].get_impl(), &ErrorImpl::UndeclaredVariable { variable: String::from("x") });
        }
        Outcome::Completed => panic!("program should have been rejected"),
    }
    assert!(output.is_empty());
}

#[test]
fn test_loop_variable_lock() {
    let source = "var i : int;\nfor i in 1..3 do i := 5; end for;\ni := 9;\nprint i;";
    let (outcome, output) = run_program(source, "");

    match outcome {
        Outcome::Rejected { kind, errors } => {
            assert_eq!(kind, ErrorKind::Semantic);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].get_impl(), &ErrorImpl::VariableLocked { variable: String::from("i") });
        }
        Outcome::Completed => panic!("program should have been rejected"),
    }
    assert!(output.is_empty());
}

#[test]
fn test_type_mismatch() {
    let (outcome, _) = run_program("var x : int := \"a\";", "");

    assert!(matches!(
        outcome,
        Outcome::Rejected { kind: ErrorKind::Semantic, ref errors } if errors.len() == 1
    ));
}

#[test]
fn test_lexical_errors_stop_the_pipeline_first() {
    let (outcome, _) = run_program("var x : int := 1 # 2;\nprint \"open;", "");

    match outcome {
        Outcome::Rejected { kind, errors } => {
            assert_eq!(kind, ErrorKind::Lexical);
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].get_impl(), &ErrorImpl::InvalidCharacter { character: '#' });
            assert_eq!(errors[1].get_impl(), &ErrorImpl::UnclosedString);
        }
        Outcome::Completed => panic!("program should have been rejected"),
    }
}

#[test]
fn test_syntax_errors_are_all_reported() {
    let source = "var x : int\nx := 1\nprint x;\nfor x in 1..2 print x; end for;";
    let (outcome, _) = run_program(source, "");

    match outcome {
        Outcome::Rejected { kind, errors } => {
            assert_eq!(kind, ErrorKind::Syntax);
            assert_eq!(errors.len(), 3);
            assert_eq!(errors[0].get_position(), Some((2, 1)));
            assert_eq!(errors[1].get_position(), Some((3, 1)));
            assert_eq!(errors[2].get_position(), Some((4, 15)));
        }
        Outcome::Completed => panic!("program should have been rejected"),
    }
}

#[test]
fn test_failed_assertion_is_written_to_output() {
    let source = "var b : bool := 1 < 2;\nassert (!b);\nprint \"done\";";
    let (outcome, output) = run_program(source, "");

    assert!(outcome.is_completed());
    assert_eq!(output, "Assertion near line 2 column 1 failed: !b\ndone");
}

#[test]
fn test_fatal_error_surfaces_from_run() {
    let mut output: Vec<u8> = Vec::new();
    let result = run("var a : int;\nread a;", "".as_bytes(), &mut output);

    assert!(matches!(result, Err(FatalError::InputExhausted)));
}

#[test]
fn test_runs_are_idempotent() {
    let source = "var x : int := 3;\nvar s : string := \"x\";\nfor x in 1..x do s := s + \"!\"; end for;\nprint s;\ny := 1;";

    let (first_ast, first_errors) = parse(tokenize(source).0).unwrap();
    let (second_ast, second_errors) = parse(tokenize(source).0).unwrap();
    assert_eq!(first_ast, second_ast);
    assert_eq!(first_errors, second_errors);

    assert_eq!(run_program(source, ""), run_program(source, ""));

    let valid = "var x : int := 3;\nvar s : string := \"x\";\nvar i : int;\nfor i in 1..x do s := s + \"!\"; end for;\nprint s;";
    let (outcome, output) = run_program(valid, "");
    assert!(outcome.is_completed());
    assert_eq!(output, "x!!!");
    assert_eq!(run_program(valid, ""), (outcome, output));
}

#[test]
fn test_rendered_diagnostic() {
    let source = "var x : int;\nprint y;";
    let (outcome, _) = run_program(source, "");

    let Outcome::Rejected { errors, .. } = outcome else {
        panic!("program should have been rejected");
    };
    let rendered = render_error(&errors[0], source);

    assert_eq!(
        rendered,
        "Error near \"y\" on line 2 column 7: Undeclared variable y\n  2 | print y;\n    |       ^"
    );
}
