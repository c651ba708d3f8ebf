use crate::{ast::ast::Expr, lexer::tokens::TokenKind};

use super::{
    builder::ExpressionBuilder,
    lookups::{Fault, ParseResult, EXPRESSION_FOLLOW, OPERAND_FIRST},
    parser::Parser,
};

/// `expr := term (binop term)*`
///
/// The tokens are only validated here; the tree itself is produced by the
/// [`ExpressionBuilder`] once the whole expression has been accepted.
pub fn parse_expr(parser: &mut Parser) -> ParseResult<Expr> {
    let mut builder = ExpressionBuilder::new();
    parse_expr_into(parser, &mut builder)?;

    builder.build().map_err(Fault::Fatal)
}

fn parse_expr_into(parser: &mut Parser, builder: &mut ExpressionBuilder) -> ParseResult<()> {
    parse_term(parser, builder)?;

    while parser.accept(&[TokenKind::BinaryOperator]) {
        builder.offer(parser.accepted().clone());
        parse_term(parser, builder)?;
    }

    Ok(())
}

/// `term := unop term | operand`
fn parse_term(parser: &mut Parser, builder: &mut ExpressionBuilder) -> ParseResult<()> {
    while parser.accept(&[TokenKind::UnaryOperator]) {
        builder.offer(parser.accepted().clone());
    }

    parse_operand(parser, builder)
}

/// `operand := int | string | bool | id | '(' expr ')'`
fn parse_operand(parser: &mut Parser, builder: &mut ExpressionBuilder) -> ParseResult<()> {
    let token = parser.expect(OPERAND_FIRST, EXPRESSION_FOLLOW)?;
    let bracketed = token.kind == TokenKind::LeftBracket;
    builder.offer(token);

    if bracketed {
        parse_expr_into(parser, builder)?;
        let close = parser.expect(&[TokenKind::RightBracket], EXPRESSION_FOLLOW)?;
        builder.offer(close);
    }

    Ok(())
}
