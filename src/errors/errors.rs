use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::TypeBinding, lexer::tokens::{Operator, Token, TokenKind}};

/// The stage a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 3] = [ErrorKind::Lexical, ErrorKind::Syntax, ErrorKind::Semantic];
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical"),
            ErrorKind::Syntax => write!(f, "syntax"),
            ErrorKind::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    token: Option<Token>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, token: Option<Token>) -> Self {
        Error {
            internal_error: error_impl,
            token,
        }
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Line and column of the anchoring token, when it carries a real position.
    pub fn get_position(&self) -> Option<(i32, i32)> {
        self.token
            .as_ref()
            .filter(|token| token.line > 0 && token.column > 0)
            .map(|token| (token.line, token.column))
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. }
            | ErrorImpl::InvalidIdentifier { .. }
            | ErrorImpl::UnclosedString
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. } => ErrorKind::Syntax,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::UndeclaredVariable { .. }
            | ErrorImpl::VariableLocked { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::OperandTypeMismatch { .. }
            | ErrorImpl::OperatorNotApplicable { .. } => ErrorKind::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::UnclosedString => "UnclosedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::UndeclaredVariable { .. } => "UndeclaredVariable",
            ErrorImpl::VariableLocked { .. } => "VariableLocked",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            ErrorImpl::OperatorNotApplicable { .. } => "OperatorNotApplicable",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => ErrorTip::None,
            ErrorImpl::InvalidIdentifier { .. } => ErrorTip::Suggestion(String::from(
                "Identifiers start with a letter followed by letters, digits or `_`",
            )),
            ErrorImpl::UnclosedString => {
                ErrorTip::Suggestion(String::from("Did you forget the closing `\"`?"))
            }
            ErrorImpl::NumberParseError { .. } => ErrorTip::Suggestion(String::from(
                "Integer literals must fit in a signed 64 bit integer",
            )),
            ErrorImpl::UnexpectedToken { expected, .. } if expected.contains(&TokenKind::Semicolon) => {
                ErrorTip::Suggestion(String::from("Did you miss a semicolon?"))
            }
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::VariableAlreadyDeclared { .. } => ErrorTip::None,
            ErrorImpl::UndeclaredVariable { variable } => ErrorTip::Suggestion(format!(
                "Declare it first with `var {} : <type>;`",
                variable
            )),
            ErrorImpl::VariableLocked { .. } => ErrorTip::Suggestion(String::from(
                "Loop variables cannot be assigned inside their own loop",
            )),
            ErrorImpl::TypeMatchError { .. } => ErrorTip::None,
            ErrorImpl::OperandTypeMismatch { .. } => ErrorTip::None,
            ErrorImpl::OperatorNotApplicable { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) if token.is_error_token() => write!(
                f,
                "Error near line {} column {}: {}",
                token.line, token.column, self.internal_error
            ),
            Some(token) => write!(
                f,
                "Error near \"{}\" on line {} column {}: {}",
                token.value, token.line, token.column, self.internal_error
            ),
            None => write!(f, "{}", self.internal_error),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Invalid input character {character:?}")]
    InvalidCharacter { character: char },
    #[error("Invalid identifier {identifier}")]
    InvalidIdentifier { identifier: String },
    #[error("Unclosed string literal")]
    UnclosedString,
    #[error("Integer literal {token} out of range")]
    NumberParseError { token: String },
    #[error("Expecting {}, but found {found}", join_kinds(.expected))]
    UnexpectedToken { expected: Vec<TokenKind>, found: TokenKind },
    #[error("Identifier {variable} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("Undeclared variable {variable}")]
    UndeclaredVariable { variable: String },
    #[error("Variable {variable} is locked by a for loop and cannot be assigned to")]
    VariableLocked { variable: String },
    #[error("Expression does not match the required type: expected {expected}, found {received}")]
    TypeMatchError { expected: TypeBinding, received: TypeBinding },
    #[error("Types of left and right operand do not match: {left} and {right}")]
    OperandTypeMismatch { left: TypeBinding, right: TypeBinding },
    #[error("Could not apply operator {operator} to type {binding}")]
    OperatorNotApplicable { operator: Operator, binding: TypeBinding },
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<String>>()
        .join(" or ")
}

/// Collects every diagnostic of a run, partitioned by kind in insertion order.
#[derive(Debug, Default, Clone)]
pub struct ErrorContainer {
    lexical: Vec<Error>,
    syntax: Vec<Error>,
    semantic: Vec<Error>,
}

impl ErrorContainer {
    pub fn new() -> Self {
        ErrorContainer::default()
    }

    pub fn add(&mut self, error: Error) {
        self.list_mut(error.kind()).push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = Error>) {
        for error in errors {
            self.add(error);
        }
    }

    pub fn errors_by_kind(&self, kind: ErrorKind) -> &[Error] {
        match kind {
            ErrorKind::Lexical => &self.lexical,
            ErrorKind::Syntax => &self.syntax,
            ErrorKind::Semantic => &self.semantic,
        }
    }

    pub fn has_errors(&self, kind: ErrorKind) -> bool {
        !self.errors_by_kind(kind).is_empty()
    }

    pub fn all_errors(&self) -> Vec<&Error> {
        ErrorKind::ALL
            .iter()
            .flat_map(|kind| self.errors_by_kind(*kind).iter())
            .collect()
    }

    fn list_mut(&mut self, kind: ErrorKind) -> &mut Vec<Error> {
        match kind {
            ErrorKind::Lexical => &mut self.lexical,
            ErrorKind::Syntax => &mut self.syntax,
            ErrorKind::Semantic => &mut self.semantic,
        }
    }
}

/// Conditions that end a run outright. None of these can be reached by a
/// program that passed all three checking stages, except the ones caused by
/// the run-time environment (input, output, arithmetic).
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("scanner has no more tokens")]
    ScannerExhausted,
    #[error("parenthesis mismatch in expression")]
    BracketMismatch,
    #[error("unknown operator {lexeme:?}")]
    UnknownOperator { lexeme: String },
    #[error("malformed expression near line {line} column {column}")]
    MalformedExpression { line: i32, column: i32 },
    #[error("unexpected token {token:?} in expression leaf")]
    InvalidLeaf { token: String },
    #[error("unknown type {lexeme:?}")]
    UnknownType { lexeme: String },
    #[error("variable {variable:?} declared twice")]
    RedeclaredAtRuntime { variable: String },
    #[error("variable {variable:?} used before declaration")]
    UndeclaredAtRuntime { variable: String },
    #[error("variable {variable:?} assigned while locked by a for loop")]
    LockedAtRuntime { variable: String },
    #[error("type assertion failed: expected {expected}, found {received}")]
    TypeAssertion { expected: TypeBinding, received: TypeBinding },
    #[error("no implementation of operator {operator} for type {binding}")]
    MissingImplementation { operator: Operator, binding: TypeBinding },
    #[error("division by zero on line {line} column {column}")]
    DivisionByZero { line: i32, column: i32 },
    #[error("the input closed unexpectedly")]
    InputExhausted,
    #[error("cannot read {input:?} as {binding}")]
    InvalidInput { input: String, binding: TypeBinding },
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
