use std::fmt::Display;

use crate::lexer::tokens::{Token, TokenKind};

use super::{
    expressions::{BinaryExpr, UnaryExpr},
    statements::{AssertStmt, AssignmentStmt, BlockStmt, ForStmt, PrintStmt, ReadStmt, VarDeclStmt},
};

/// Root of a parsed program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AbstractSyntaxTree {
    pub statements: BlockStmt,
}

impl AbstractSyntaxTree {
    pub fn new(statements: BlockStmt) -> Self {
        AbstractSyntaxTree { statements }
    }
}

impl Display for AbstractSyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statements)
    }
}

/// Statement Types
///
/// Every visitor matches on this exhaustively, so a new statement kind must
/// be handled by the parser, the type checker and the interpreter alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    For(ForStmt),
    Print(PrintStmt),
    Read(ReadStmt),
    Assert(AssertStmt),
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::VarDecl(declaration) => {
                write!(f, "var {} : {}", declaration.identifier, declaration.type_token)?;
                if let Some(expression) = &declaration.expression {
                    write!(f, " := {}", expression)?;
                }
                Ok(())
            }
            Stmt::Assignment(assignment) => write!(f, "{} := {}", assignment.identifier, assignment.expression),
            Stmt::For(for_stmt) => write!(
                f,
                "for {} in {}..{} do\n{}end for",
                for_stmt.variable, for_stmt.from, for_stmt.to, for_stmt.body
            ),
            Stmt::Print(print) => write!(f, "print {}", print.expression),
            Stmt::Read(read) => write!(f, "read {}", read.identifier),
            Stmt::Assert(assert) => write!(f, "assert ({})", assert.assertion),
        }
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    /// Identifier or literal
    Leaf(Token),
}

impl Expr {
    /// The token diagnostics about this expression are anchored on.
    pub fn head(&self) -> &Token {
        match self {
            Expr::Binary(binary) => &binary.operator_token,
            Expr::Unary(unary) => &unary.operator_token,
            Expr::Leaf(token) => token,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Binary(binary) => {
                write_operand(f, &binary.left)?;
                write!(f, " {} ", binary.operator)?;
                write_operand(f, &binary.right)
            }
            Expr::Unary(unary) => {
                write!(f, "{}", unary.operator)?;
                write_operand(f, &unary.operand)
            }
            Expr::Leaf(token) => match token.kind {
                TokenKind::StringLiteral => write!(f, "{:?}", token.value),
                _ => write!(f, "{}", token.value),
            },
        }
    }
}

fn write_operand(f: &mut std::fmt::Formatter<'_>, operand: &Expr) -> std::fmt::Result {
    match operand {
        Expr::Leaf(_) => write!(f, "{}", operand),
        _ => write!(f, "({})", operand),
    }
}
