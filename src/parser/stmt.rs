use crate::{
    ast::{
        ast::Stmt,
        statements::{AssertStmt, AssignmentStmt, ForStmt, PrintStmt, ReadStmt, VarDeclStmt},
        types::TypeBinding,
    },
    errors::errors::FatalError,
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    lookups::{skippable, Fault, ParseResult, BODY_FIRST, EXPRESSION_FIRST, TYPES},
    parser::Parser,
};

/// `'var' id ':' type [':=' expr]`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.accept(&[TokenKind::Var]);

    let identifier = parser.expect_part(&[TokenKind::Identifier], &[TokenKind::Colon])?;
    let colon = parser.expect_part(&[TokenKind::Colon], TYPES)?;
    let type_token = skippable(parser.expect(TYPES, &[TokenKind::Assignment]))?;

    let expression = if parser.accept(&[TokenKind::Assignment]) {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    match (identifier, colon, type_token) {
        (Some(identifier), Some(_), Some(type_token)) => {
            let binding = TypeBinding::from_type_kind(type_token.kind).ok_or_else(|| {
                Fault::Fatal(FatalError::UnknownType {
                    lexeme: type_token.value.clone(),
                })
            })?;

            Ok(Stmt::VarDecl(VarDeclStmt {
                identifier,
                type_token,
                binding,
                expression,
            }))
        }
        _ => Err(Fault::Skip),
    }
}

/// `id ':=' expr`
pub fn parse_assignment_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.accept(&[TokenKind::Identifier]);
    let identifier = parser.accepted().clone();

    let assignment = parser.expect_part(&[TokenKind::Assignment], EXPRESSION_FIRST)?;
    let expression = parse_expr(parser)?;

    if assignment.is_none() {
        return Err(Fault::Skip);
    }

    Ok(Stmt::Assignment(AssignmentStmt { identifier, expression }))
}

/// `'for' id 'in' expr '..' expr 'do' statements 'end' 'for'`
///
/// A missing piece of the header is reported and the rest of the loop is
/// still parsed, so the body does not spill into the enclosing statements.
pub fn parse_for_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.accept(&[TokenKind::For]);

    let variable = parser.expect_part(&[TokenKind::Identifier], &[TokenKind::In])?;
    let keyword_in = parser.expect_part(&[TokenKind::In], EXPRESSION_FIRST)?;
    let from = skippable(parse_expr(parser))?;
    let from = parser.resume(from)?;
    let range = parser.expect_part(&[TokenKind::Range], EXPRESSION_FIRST)?;
    let to = skippable(parse_expr(parser))?;
    let to = parser.resume(to)?;
    let keyword_do = skippable(parser.expect(&[TokenKind::Do], BODY_FIRST))?;

    let body = parser.statements()?;

    let end = skippable(parser.expect(&[TokenKind::End], &[TokenKind::For]))?;
    let closing_for = skippable(parser.expect(&[TokenKind::For], &[]))?;

    let complete = keyword_in.is_some()
        && range.is_some()
        && keyword_do.is_some()
        && end.is_some()
        && closing_for.is_some();

    match (variable, from, to) {
        (Some(variable), Some(from), Some(to)) if complete => Ok(Stmt::For(ForStmt {
            variable,
            from,
            to,
            body,
        })),
        _ => Err(Fault::Skip),
    }
}

/// `'read' id`
pub fn parse_read_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.accept(&[TokenKind::Read]);
    let identifier = parser.expect(&[TokenKind::Identifier], &[])?;

    Ok(Stmt::Read(ReadStmt { identifier }))
}

/// `'print' expr`
pub fn parse_print_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.accept(&[TokenKind::Print]);
    let expression = parse_expr(parser)?;

    Ok(Stmt::Print(PrintStmt { expression }))
}

/// `'assert' '(' expr ')'`
pub fn parse_assert_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.accept(&[TokenKind::Assert]);
    let location = parser.accepted().clone();

    let open = parser.expect_part(&[TokenKind::LeftBracket], EXPRESSION_FIRST)?;

    let first = parser.current_token().clone();
    let assertion = skippable(parse_expr(parser))?;
    let assertion = parser.resume(assertion)?;
    let last = parser.accepted().clone();

    let close = skippable(parser.expect(&[TokenKind::RightBracket], &[]))?;

    match assertion {
        Some(assertion) if open.is_some() && close.is_some() => Ok(Stmt::Assert(AssertStmt {
            location,
            source: parser.source_between(&first, &last),
            assertion,
        })),
        _ => Err(Fault::Skip),
    }
}
