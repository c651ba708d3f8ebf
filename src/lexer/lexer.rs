use std::{collections::VecDeque, io::Read};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl, FatalError}, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP, SIMPLE_LEXEMES};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}\p{Nd}_]*$").unwrap();
}

pub type LexemePredicate = fn(&Scanner, char) -> bool;
pub type LexemeHandler = fn(&mut Scanner, char);

/// One row of the classification table: the first pattern whose predicate
/// accepts the lexeme's first character handles the lexeme.
#[derive(Clone, Copy)]
pub struct LexemePattern {
    matches: LexemePredicate,
    handler: LexemeHandler,
}

/// Converts source text into a fully buffered token queue.
///
/// All scanning happens in [`Scanner::new`]; afterwards the scanner is a
/// plain queue with `has_next`, `peek` and `next`.
pub struct Scanner {
    patterns: Vec<LexemePattern>,
    tokens: VecDeque<Token>,
    errors: Vec<Error>,
    source: String,
    chars: Vec<(usize, char)>,
    pos: usize,
    line: i32,
    column: i32,
    lexeme_line: i32,
    lexeme_column: i32,
    lexeme_start: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Scanner {
        let mut scanner = Scanner {
            patterns: vec![
                LexemePattern { matches: |_, c| SIMPLE_LEXEMES.contains_key(&c), handler: simple_handler },
                LexemePattern { matches: |_, c| c.is_alphabetic(), handler: word_handler },
                LexemePattern { matches: |_, c| c.is_ascii_digit(), handler: number_handler },
                LexemePattern { matches: |_, c| c == '"', handler: string_handler },
                LexemePattern { matches: |_, c| c == ':', handler: colon_handler },
                LexemePattern { matches: |scanner, c| c == '.' && scanner.peek_char() == Some('.'), handler: range_handler },
            ],
            tokens: VecDeque::new(),
            errors: vec![],
            source: String::from(source),
            chars: source.char_indices().collect(),
            pos: 0,
            line: 1,
            column: 1,
            lexeme_line: -1,
            lexeme_column: -1,
            lexeme_start: 0,
        };

        scanner.scan();
        scanner
    }

    pub fn from_reader(mut reader: impl Read) -> std::io::Result<Scanner> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Scanner::new(&source))
    }

    pub fn has_next(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn peek(&self) -> Result<&Token, FatalError> {
        self.tokens.front().ok_or(FatalError::ScannerExhausted)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Token, FatalError> {
        self.tokens.pop_front().ok_or(FatalError::ScannerExhausted)
    }

    /// Number of tokens not yet taken.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The token standing for the end of input, positioned after the last character.
    pub fn eof_token(&self) -> Token {
        let end = self.source.len();
        MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.line, self.column, Span { start: end, end })
    }

    fn scan(&mut self) {
        self.skip_blank();

        while !self.at_eof() {
            self.begin_lexeme();
            let Some(current) = self.next_char() else {
                break;
            };

            let pattern = self.patterns.iter().copied().find(|pattern| (pattern.matches)(self, current));
            match pattern {
                Some(pattern) => (pattern.handler)(self, current),
                None => self.error(ErrorImpl::InvalidCharacter { character: current }, current.to_string()),
            }

            self.skip_blank();
        }
    }

    fn begin_lexeme(&mut self) {
        self.lexeme_line = self.line;
        self.lexeme_column = self.column;
        self.lexeme_start = self.byte_offset();
    }

    fn byte_offset(&self) -> usize {
        self.chars.get(self.pos).map(|(offset, _)| *offset).unwrap_or(self.source.len())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn read_while(&mut self, lexeme: &mut String, condition: fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !condition(c) {
                break;
            }
            lexeme.push(c);
            self.next_char();
        }
    }

    fn skip_blank(&mut self) {
        while self.peek_char().is_some_and(is_blank) {
            self.next_char();
        }
    }

    fn lexeme_span(&self) -> Span {
        Span {
            start: self.lexeme_start,
            end: self.byte_offset(),
        }
    }

    fn push(&mut self, kind: TokenKind, value: String) {
        let token = MK_TOKEN!(kind, value, self.lexeme_line, self.lexeme_column, self.lexeme_span());
        self.tokens.push_back(token);
    }

    /// Records a lexical error anchored at the start of the current lexeme.
    fn error(&mut self, error_impl: ErrorImpl, lexeme: String) {
        let anchor = MK_TOKEN!(TokenKind::None, lexeme, self.lexeme_line, self.lexeme_column, self.lexeme_span());
        self.errors.push(Error::new(error_impl, Some(anchor)));
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn ends_word(c: char) -> bool {
    SIMPLE_LEXEMES.contains_key(&c) || is_blank(c) || c == '.' || c == ':' || c == '"'
}

fn simple_handler(scanner: &mut Scanner, current: char) {
    if let Some(kind) = SIMPLE_LEXEMES.get(&current) {
        scanner.push(*kind, current.to_string());
    }
}

fn word_handler(scanner: &mut Scanner, current: char) {
    let mut lexeme = current.to_string();
    scanner.read_while(&mut lexeme, |c| !ends_word(c));

    if let Some(kind) = RESERVED_LOOKUP.get(lexeme.as_str()) {
        scanner.push(*kind, lexeme);
    } else if lexeme == "true" || lexeme == "false" {
        scanner.push(TokenKind::BooleanLiteral, lexeme);
    } else if IDENTIFIER.is_match(&lexeme) {
        scanner.push(TokenKind::Identifier, lexeme);
    } else {
        scanner.error(ErrorImpl::InvalidIdentifier { identifier: lexeme.clone() }, lexeme);
    }
}

fn number_handler(scanner: &mut Scanner, current: char) {
    let mut lexeme = current.to_string();
    scanner.read_while(&mut lexeme, |c| c.is_ascii_digit());

    if lexeme.parse::<i64>().is_ok() {
        scanner.push(TokenKind::IntegerLiteral, lexeme);
    } else {
        scanner.error(ErrorImpl::NumberParseError { token: lexeme.clone() }, lexeme);
    }
}

fn string_handler(scanner: &mut Scanner, _current: char) {
    let mut result = String::new();

    loop {
        match scanner.next_char() {
            None => {
                scanner.error(ErrorImpl::UnclosedString, format!("\"{}", result));
                return;
            }
            Some('"') => break,
            Some('\\') => match scanner.next_char() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some(escaped) => result.push(escaped),
                None => {
                    scanner.error(ErrorImpl::UnclosedString, format!("\"{}", result));
                    return;
                }
            },
            Some(ch) => result.push(ch),
        }
    }

    scanner.push(TokenKind::StringLiteral, result);
}

fn colon_handler(scanner: &mut Scanner, _current: char) {
    if scanner.peek_char() == Some('=') {
        scanner.next_char();
        scanner.push(TokenKind::Assignment, String::from(":="));
    } else {
        scanner.push(TokenKind::Colon, String::from(":"));
    }
}

fn range_handler(scanner: &mut Scanner, _current: char) {
    scanner.next_char();
    scanner.push(TokenKind::Range, String::from(".."));
}

/// Scans the whole source, returning the token queue and the lexical errors found.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> (Scanner, Vec<Error>) {
    let mut scanner = Scanner::new(source);
    let errors = scanner.take_errors();

    tracing::debug!(tokens = scanner.remaining(), errors = errors.len(), "scanned source");
    (scanner, errors)
}
