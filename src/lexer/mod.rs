//! Lexical analysis module.
//!
//! This module contains the scanner that converts source text into a
//! buffered stream of tokens for parsing. It handles:
//!
//! - Classification of lexemes through an ordered table of patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line/column tracking for error reporting
//! - Character-level error recovery (one bad character, one error)

pub mod lexer;
pub mod tokens;
