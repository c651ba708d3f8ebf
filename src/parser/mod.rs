//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms the
//! scanner's tokens into an Abstract Syntax Tree. It handles:
//!
//! - Statement parsing through a lookup of statement handlers
//! - Expression validation, with trees built by the shunting-yard builder
//! - Panic-mode error recovery driven by FIRST and FOLLOW sets
//!
//! Every syntax error is reported once and parsing always continues to the
//! end of the input.

pub mod builder;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
