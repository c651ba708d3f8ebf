use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Stmt, errors::errors::FatalError, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

/// Why a production stopped without producing a node.
#[derive(Debug)]
pub enum Fault {
    /// Resynchronised on a FOLLOW token: the production yields no node and
    /// the enclosing production carries on from the current token.
    Skip,
    /// Resynchronised on a statement starter or end of file: the enclosing
    /// construct is abandoned as well.
    Halt,
    /// An invariant of the parser itself was broken.
    Fatal(FatalError),
}

pub type ParseResult<T> = Result<T, Fault>;

pub type StmtHandler = fn(&mut Parser) -> ParseResult<Stmt>;

/// FIRST set of `statement`, in the order used for messages.
pub const STATEMENT_FIRST: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::Identifier,
    TokenKind::For,
    TokenKind::Read,
    TokenKind::Print,
    TokenKind::Assert,
];

/// Tokens that always begin a new statement. Recovery never skips past them.
pub const STARTERS: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::For,
    TokenKind::Read,
    TokenKind::Print,
    TokenKind::Assert,
];

pub const STATEMENT_FOLLOW: &[TokenKind] = &[TokenKind::Semicolon, TokenKind::End];

pub const EXPRESSION_FOLLOW: &[TokenKind] = &[
    TokenKind::Semicolon,
    TokenKind::Range,
    TokenKind::Do,
    TokenKind::RightBracket,
    TokenKind::End,
];

pub const OPERAND_FIRST: &[TokenKind] = &[
    TokenKind::IntegerLiteral,
    TokenKind::StringLiteral,
    TokenKind::BooleanLiteral,
    TokenKind::Identifier,
    TokenKind::LeftBracket,
];

pub const EXPRESSION_FIRST: &[TokenKind] = &[
    TokenKind::IntegerLiteral,
    TokenKind::StringLiteral,
    TokenKind::BooleanLiteral,
    TokenKind::Identifier,
    TokenKind::LeftBracket,
    TokenKind::UnaryOperator,
];

pub const TYPES: &[TokenKind] = &[TokenKind::IntType, TokenKind::StringType, TokenKind::BoolType];

/// What may follow `do`: the loop body or its closing `end`.
pub const BODY_FIRST: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::Identifier,
    TokenKind::For,
    TokenKind::Read,
    TokenKind::Print,
    TokenKind::Assert,
    TokenKind::End,
];

lazy_static! {
    pub static ref STMT_LOOKUP: HashMap<TokenKind, StmtHandler> = {
        let mut map: HashMap<TokenKind, StmtHandler> = HashMap::new();
        map.insert(TokenKind::Var, parse_var_decl_stmt);
        map.insert(TokenKind::Identifier, parse_assignment_stmt);
        map.insert(TokenKind::For, parse_for_stmt);
        map.insert(TokenKind::Read, parse_read_stmt);
        map.insert(TokenKind::Print, parse_print_stmt);
        map.insert(TokenKind::Assert, parse_assert_stmt);
        map
    };
}

/// Turns a `Skip` into `None` so a production can keep parsing its remaining
/// parts; `Halt` and `Fatal` still propagate.
pub fn skippable<T>(result: ParseResult<T>) -> ParseResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Fault::Skip) => Ok(None),
        Err(fault) => Err(fault),
    }
}
