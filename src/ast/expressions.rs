use crate::lexer::tokens::{Operator, Token};

use super::ast::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator_token: Token,
    pub operator: Operator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator_token: Token,
    pub operator: Operator,
    pub operand: Box<Expr>,
}
