//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level parsing
//! functions. Statements are dispatched through `STMT_LOOKUP`; expressions
//! are collected token by token and handed to the expression builder.
//!
//! Syntax errors never abort the parse. On a mismatch the parser records
//! `Expecting X [or Y...], but found Z` and skips tokens until one of:
//! - an expected token (retry, the production continues)
//! - a FOLLOW token of the production (`Fault::Skip`, no node)
//! - a statement starter or end of file (`Fault::Halt`, the enclosing
//!   construct gives up too)

use crate::{
    ast::{ast::{AbstractSyntaxTree, Stmt}, statements::BlockStmt},
    errors::errors::{Error, ErrorImpl, FatalError},
    lexer::{lexer::Scanner, tokens::{Token, TokenKind}},
};

use super::lookups::{skippable, Fault, ParseResult, STARTERS, STATEMENT_FIRST, STATEMENT_FOLLOW, STMT_LOOKUP};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The buffered token source
    scanner: Scanner,
    /// Current lookahead token
    token: Token,
    /// The last token accepted
    accepted: Token,
    /// Syntax errors recorded so far
    errors: Vec<Error>,
}

impl Parser {
    /// Creates a new Parser positioned on the first token.
    pub fn new(scanner: Scanner) -> Self {
        let mut parser = Parser {
            scanner,
            token: Token::error_token(),
            accepted: Token::error_token(),
            errors: vec![],
        };
        parser.advance();
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Returns the most recently accepted token.
    pub fn accepted(&self) -> &Token {
        &self.accepted
    }

    /// Moves to the next token. Past the last token the lookahead stays on EOF.
    pub fn advance(&mut self) {
        self.token = match self.scanner.next() {
            Ok(token) => token,
            Err(_) => self.scanner.eof_token(),
        };
    }

    /// Consumes the current token if its kind is one of `kinds`.
    pub fn accept(&mut self, kinds: &[TokenKind]) -> bool {
        if self.token.is_one_of_many(kinds) {
            self.accepted = self.token.clone();
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of one of the `expected` kinds, recovering when the
    /// current token is something else.
    ///
    /// # Arguments
    ///
    /// * `expected` - Kinds accepted at this point of the production
    /// * `follow` - Kinds that may follow the production; reaching one abandons it.
    ///   The end of the current statement (`;`, `end`) always counts as follow.
    ///
    /// # Returns
    ///
    /// The accepted token, possibly after skipping unexpected tokens.
    pub fn expect(&mut self, expected: &[TokenKind], follow: &[TokenKind]) -> ParseResult<Token> {
        if self.accept(expected) {
            return Ok(self.accepted.clone());
        }

        self.unexpected(expected);

        loop {
            let kind = self.current_token_kind();
            if follow.contains(&kind) || STATEMENT_FOLLOW.contains(&kind) {
                return Err(Fault::Skip);
            }
            if STARTERS.contains(&kind) || kind == TokenKind::EOF {
                return Err(Fault::Halt);
            }

            self.advance();

            if self.accept(expected) {
                return Ok(self.accepted.clone());
            }
        }
    }

    /// Like [`Parser::expect`], but a part skipped on a FOLLOW token comes back
    /// as `None` so the rest of the statement can still be parsed.
    pub fn expect_part(&mut self, expected: &[TokenKind], follow: &[TokenKind]) -> ParseResult<Option<Token>> {
        let part = skippable(self.expect(expected, follow))?;
        self.resume(part)
    }

    /// Gives up on the statement when a missing part left the parser at its end.
    pub fn resume<T>(&self, part: Option<T>) -> ParseResult<Option<T>> {
        if part.is_none() && STATEMENT_FOLLOW.contains(&self.current_token_kind()) {
            return Err(Fault::Skip);
        }
        Ok(part)
    }

    /// Records a syntax error for the current token.
    pub fn unexpected(&mut self, expected: &[TokenKind]) {
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected.to_vec(),
                found: self.token.kind,
            },
            Some(self.token.clone()),
        );
        self.errors.push(error);
    }

    /// Source text from the start of `first` to the end of `last`.
    pub fn source_between(&self, first: &Token, last: &Token) -> String {
        self.scanner
            .source()
            .get(first.span.start..last.span.end)
            .map(String::from)
            .unwrap_or_default()
    }

    /// `statements := statement (';' statement)* [';']`
    ///
    /// Keeps consuming statements while the lookahead can start one. A
    /// missing `;` between two statements is reported and parsing carries on.
    pub fn statements(&mut self) -> ParseResult<BlockStmt> {
        let mut block = BlockStmt::default();

        while STATEMENT_FIRST.contains(&self.current_token_kind()) {
            let mut halted = false;

            match self.statement() {
                Ok(stmt) => block.push(stmt),
                Err(Fault::Skip) => {}
                Err(Fault::Halt) => halted = true,
                Err(fatal) => return Err(fatal),
            }

            if self.accept(&[TokenKind::Semicolon]) || halted {
                continue;
            }

            if STATEMENT_FIRST.contains(&self.current_token_kind()) {
                self.unexpected(&[TokenKind::Semicolon]);
                continue;
            }

            break;
        }

        Ok(block)
    }

    /// Parses one statement through the statement lookup.
    pub fn statement(&mut self) -> ParseResult<Stmt> {
        match STMT_LOOKUP.get(&self.current_token_kind()) {
            Some(handler) => handler(self),
            None => {
                self.unexpected(STATEMENT_FIRST);
                Err(Fault::Skip)
            }
        }
    }

    /// Parses the whole token stream.
    fn program(&mut self) -> Result<BlockStmt, FatalError> {
        let mut program = BlockStmt::default();

        loop {
            match self.statements() {
                Ok(block) => program.body.extend(block.body),
                Err(Fault::Fatal(fatal)) => return Err(fatal),
                Err(_) => {}
            }

            if self.current_token_kind() == TokenKind::EOF {
                break;
            }

            // Something that cannot continue the statement list
            if matches!(self.accepted.kind, TokenKind::Semicolon | TokenKind::None) {
                self.unexpected(STATEMENT_FIRST);
            } else {
                self.unexpected(&[TokenKind::Semicolon]);
            }

            self.advance();
            while !STATEMENT_FIRST.contains(&self.current_token_kind())
                && self.current_token_kind() != TokenKind::EOF
            {
                self.advance();
            }
        }

        Ok(program)
    }
}

/// Parses a token stream into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. Syntax errors are collected and
/// returned next to the tree built around them; only a broken parser
/// invariant ends the parse early.
///
/// # Returns
///
/// A tuple containing:
/// - The tree (statements that failed to parse are left out)
/// - The syntax errors in source order
#[tracing::instrument(skip_all, fields(token_count = scanner.remaining()))]
pub fn parse(scanner: Scanner) -> Result<(AbstractSyntaxTree, Vec<Error>), FatalError> {
    let mut parser = Parser::new(scanner);
    let program = parser.program()?;

    tracing::debug!(statements = program.len(), errors = parser.errors.len(), "parsed program");
    Ok((AbstractSyntaxTree::new(program), parser.errors))
}
