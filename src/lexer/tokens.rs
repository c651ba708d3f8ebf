use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("for", TokenKind::For);
        map.insert("do", TokenKind::Do);
        map.insert("end", TokenKind::End);
        map.insert("in", TokenKind::In);
        map.insert("var", TokenKind::Var);
        map.insert("assert", TokenKind::Assert);
        map.insert("print", TokenKind::Print);
        map.insert("read", TokenKind::Read);
        map.insert("bool", TokenKind::BoolType);
        map.insert("string", TokenKind::StringType);
        map.insert("int", TokenKind::IntType);
        map
    };

    /// Characters that form a complete lexeme on their own.
    pub static ref SIMPLE_LEXEMES: HashMap<char, TokenKind> = {
        let mut map = HashMap::new();
        map.insert('(', TokenKind::LeftBracket);
        map.insert(')', TokenKind::RightBracket);
        map.insert('<', TokenKind::BinaryOperator);
        map.insert('=', TokenKind::BinaryOperator);
        map.insert('&', TokenKind::BinaryOperator);
        map.insert('+', TokenKind::BinaryOperator);
        map.insert('-', TokenKind::BinaryOperator);
        map.insert('*', TokenKind::BinaryOperator);
        map.insert('/', TokenKind::BinaryOperator);
        map.insert('!', TokenKind::UnaryOperator);
        map.insert(';', TokenKind::Semicolon);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,

    IntegerLiteral,
    StringLiteral,
    BooleanLiteral,

    // Concrete operator is recovered from the lexeme
    BinaryOperator,
    UnaryOperator,

    Assignment, // :=

    // Reserved
    For,
    In,
    Do,
    Var,
    End,
    Assert,
    Print,
    Read,
    IntType,
    StringType,
    BoolType,

    Semicolon,
    Colon,
    LeftBracket,
    RightBracket,
    Range, // ..

    EOF,
    /// Marks the absence of a token
    None,
}

impl TokenKind {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral | TokenKind::StringLiteral | TokenKind::BooleanLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::BinaryOperator => "binary operator",
            TokenKind::UnaryOperator => "unary operator",
            TokenKind::Assignment => "\":=\"",
            TokenKind::For => "\"for\"",
            TokenKind::In => "\"in\"",
            TokenKind::Do => "\"do\"",
            TokenKind::Var => "\"var\"",
            TokenKind::End => "\"end\"",
            TokenKind::Assert => "\"assert\"",
            TokenKind::Print => "\"print\"",
            TokenKind::Read => "\"read\"",
            TokenKind::IntType => "\"int\"",
            TokenKind::StringType => "\"string\"",
            TokenKind::BoolType => "\"bool\"",
            TokenKind::Semicolon => "\";\"",
            TokenKind::Colon => "\":\"",
            TokenKind::LeftBracket => "\"(\"",
            TokenKind::RightBracket => "\")\"",
            TokenKind::Range => "\"..\"",
            TokenKind::EOF => "end of file",
            TokenKind::None => "nothing",
        };
        write!(f, "{}", name)
    }
}

/// The fixed operator set, recovered from operator lexemes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    And,
    Equality,
    Less,
    Not,
}

impl Operator {
    pub fn from_lexeme(lexeme: &str) -> Option<Operator> {
        match lexeme {
            "+" => Some(Operator::Addition),
            "-" => Some(Operator::Subtraction),
            "*" => Some(Operator::Multiplication),
            "/" => Some(Operator::Division),
            "&" => Some(Operator::And),
            "=" => Some(Operator::Equality),
            "<" => Some(Operator::Less),
            "!" => Some(Operator::Not),
            _ => None,
        }
    }

    pub fn lexeme(&self) -> &'static str {
        match self {
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Multiplication => "*",
            Operator::Division => "/",
            Operator::And => "&",
            Operator::Equality => "=",
            Operator::Less => "<",
            Operator::Not => "!",
        }
    }

    /// Higher binds tighter. All binary operators are left associative.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Not => 1,
            Operator::Equality | Operator::Less => 2,
            Operator::And => 3,
            Operator::Addition | Operator::Subtraction => 4,
            Operator::Multiplication | Operator::Division => 5,
        }
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Not)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: i32,
    pub column: i32,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: String, line: i32, column: i32, span: Span) -> Self {
        Token {
            kind,
            value,
            line,
            column,
            span,
        }
    }

    /// The "no token" value: category `None`, positioned at -1,-1.
    pub fn error_token() -> Self {
        Token::new(TokenKind::None, String::new(), -1, -1, Span::default())
    }

    pub fn is_error_token(&self) -> bool {
        self.kind == TokenKind::None
    }

    pub fn is_operand(&self) -> bool {
        self.kind == TokenKind::Identifier || self.kind.is_literal()
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// The concrete operator behind an operator token.
    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::BinaryOperator | TokenKind::UnaryOperator => Operator::from_lexeme(&self.value),
            _ => None,
        }
    }
}
