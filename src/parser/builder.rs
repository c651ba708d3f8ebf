//! Turns the flat token sequence of an expression into an expression tree.
//!
//! The parser only checks that an expression is well formed and offers each
//! token it accepts. [`ExpressionBuilder::build`] then runs a shunting-yard
//! pass from right to left, which leaves the operators in Polish (prefix)
//! order, and rebuilds the tree by reading that order back.

use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, UnaryExpr},
    },
    errors::errors::FatalError,
    lexer::tokens::{Operator, Token, TokenKind},
};

#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    input: Vec<Token>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next token of the expression, in source order.
    pub fn offer(&mut self, token: Token) {
        self.input.push(token);
    }

    pub fn build(self) -> Result<Expr, FatalError> {
        let (line, column) = self
            .input
            .first()
            .map(|token| (token.line, token.column))
            .unwrap_or((-1, -1));

        let mut output = polish_order(self.input)?;
        let expr = rebuild(&mut output, (line, column))?;

        if !output.is_empty() {
            return Err(FatalError::MalformedExpression { line, column });
        }

        Ok(expr)
    }
}

/// Shunting yard over the reversed input.
///
/// The result is the Polish order reversed, so popping from its end yields
/// the prefix form. Unary operators go straight to the output: scanning from
/// the right, their operand is already complete when they are reached.
fn polish_order(input: Vec<Token>) -> Result<Vec<Token>, FatalError> {
    let mut output: Vec<Token> = Vec::with_capacity(input.len());
    let mut operators: Vec<Token> = vec![];

    for token in input.into_iter().rev() {
        match token.kind {
            TokenKind::RightBracket => operators.push(token),
            TokenKind::LeftBracket => loop {
                match operators.pop() {
                    Some(top) if top.kind == TokenKind::RightBracket => break,
                    Some(top) => output.push(top),
                    None => return Err(FatalError::BracketMismatch),
                }
            },
            TokenKind::UnaryOperator => output.push(token),
            TokenKind::BinaryOperator => {
                let precedence = operator_of(&token)?.precedence();

                while let Some(top) = operators.last() {
                    if top.kind == TokenKind::RightBracket || operator_of(top)?.precedence() <= precedence {
                        break;
                    }
                    if let Some(top) = operators.pop() {
                        output.push(top);
                    }
                }

                operators.push(token);
            }
            _ if token.is_operand() => output.push(token),
            _ => return Err(FatalError::InvalidLeaf { token: token.value }),
        }
    }

    while let Some(top) = operators.pop() {
        if top.kind == TokenKind::RightBracket {
            return Err(FatalError::BracketMismatch);
        }
        output.push(top);
    }

    Ok(output)
}

/// Reads one prefix-ordered subtree off the end of `output`.
///
/// `position` locates the expression when the output runs dry midway.
fn rebuild(output: &mut Vec<Token>, position: (i32, i32)) -> Result<Expr, FatalError> {
    let (line, column) = position;
    let token = output.pop().ok_or(FatalError::MalformedExpression { line, column })?;

    match token.kind {
        TokenKind::UnaryOperator => {
            let operator = operator_of(&token)?;
            let operand = rebuild(output, position)?;

            Ok(Expr::Unary(UnaryExpr {
                operator_token: token,
                operator,
                operand: Box::new(operand),
            }))
        }
        TokenKind::BinaryOperator => {
            let operator = operator_of(&token)?;
            let left = rebuild(output, position)?;
            let right = rebuild(output, position)?;

            Ok(Expr::Binary(BinaryExpr {
                operator_token: token,
                operator,
                left: Box::new(left),
                right: Box::new(right),
            }))
        }
        _ if token.is_operand() => Ok(Expr::Leaf(token)),
        _ => Err(FatalError::InvalidLeaf { token: token.value }),
    }
}

fn operator_of(token: &Token) -> Result<Operator, FatalError> {
    token.operator().ok_or_else(|| FatalError::UnknownOperator {
        lexeme: token.value.clone(),
    })
}
