//! Runs a whole program through scanning, parsing, analysis and execution.

use std::io::{BufRead, Write};

use crate::{
    errors::errors::{Error, ErrorContainer, ErrorKind, FatalError},
    interpreter::interpreter::interpret,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

/// How a run ended when no fatal error occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every stage passed and the program was executed.
    Completed,
    /// The first stage that reported errors, with everything it reported.
    Rejected { kind: ErrorKind, errors: Vec<Error> },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Scans, parses, checks and runs `source`.
///
/// Each stage runs only if the one before it reported nothing. Every call
/// builds its own scanner, parser, symbol tables and interpreter.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn run<R: BufRead, W: Write>(source: &str, input: R, output: W) -> Result<Outcome, FatalError> {
    let mut errors = ErrorContainer::new();

    let (scanner, lexical) = tokenize(source);
    errors.extend(lexical);
    if let Some(outcome) = rejected(&errors, ErrorKind::Lexical) {
        return Ok(outcome);
    }

    let (ast, syntax) = parse(scanner)?;
    errors.extend(syntax);
    if let Some(outcome) = rejected(&errors, ErrorKind::Syntax) {
        return Ok(outcome);
    }

    errors.extend(type_check(&ast));
    if let Some(outcome) = rejected(&errors, ErrorKind::Semantic) {
        return Ok(outcome);
    }

    interpret(&ast, input, output)?;
    Ok(Outcome::Completed)
}

fn rejected(errors: &ErrorContainer, kind: ErrorKind) -> Option<Outcome> {
    if !errors.has_errors(kind) {
        return None;
    }

    let errors = errors.errors_by_kind(kind).to_vec();
    tracing::debug!(%kind, count = errors.len(), "stage rejected the program");
    Some(Outcome::Rejected { kind, errors })
}
