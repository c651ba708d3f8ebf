use std::{fmt::Display, slice::Iter};

use crate::lexer::tokens::Token;

use super::types::TypeBinding;

use super::ast::{Expr, Stmt};

/// An ordered sequence of statements: the program body or a loop body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn len(&self) -> usize {
        self.body.len()
    }
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in self.iter() {
            writeln!(f, "{};", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: Token,
    pub type_token: Token,
    /// Resolved from `type_token` when the declaration is parsed.
    pub binding: TypeBinding,
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub identifier: Token,
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: Token,
    pub from: Expr,
    pub to: Expr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadStmt {
    pub identifier: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssertStmt {
    /// The `assert` keyword
    pub location: Token,
    pub assertion: Expr,
    /// Source text of the assertion expression
    pub source: String,
}
