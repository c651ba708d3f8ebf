use crate::{
    ast::{
        ast::{AbstractSyntaxTree, Expr, Stmt},
        statements::{BlockStmt, ForStmt, VarDeclStmt},
        types::TypeBinding,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Operator, Token, TokenKind},
};

use super::symbol_table::{SymbolError, SymbolTable};

/// Single pass over the tree checking declare-before-use, loop variable
/// locks and expression types. Declarations are entered into the table as
/// they are met, so there is no separate declaration pass.
#[derive(Debug, Default)]
pub struct TypeChecker {
    symbols: SymbolTable<()>,
    errors: Vec<Error>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, ast: &AbstractSyntaxTree) -> Vec<Error> {
        self.check_block(&ast.statements);
        self.errors
    }

    fn check_block(&mut self, block: &BlockStmt) {
        for stmt in block.iter() {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(declaration) => self.check_declaration(declaration),
            Stmt::Assignment(assignment) => {
                if let Some(binding) = self.validate_target(&assignment.identifier) {
                    self.require(&assignment.expression, binding);
                }
            }
            Stmt::For(for_stmt) => self.check_for(for_stmt),
            Stmt::Print(print) => {
                self.decide_type(&print.expression);
            }
            Stmt::Read(read) => {
                self.validate_target(&read.identifier);
            }
            Stmt::Assert(assert) => self.require(&assert.assertion, TypeBinding::Boolean),
        }
    }

    fn check_declaration(&mut self, declaration: &VarDeclStmt) {
        let binding = declaration.binding;
        let name = &declaration.identifier.value;
        if self.symbols.declare(name, binding, ()).is_err() {
            self.report(
                ErrorImpl::VariableAlreadyDeclared { variable: name.clone() },
                &declaration.identifier,
            );
            return;
        }

        if let Some(expression) = &declaration.expression {
            self.require(expression, binding);
        }
    }

    /// A loop whose variable cannot be assigned, or is not an integer, is not
    /// checked any further.
    fn check_for(&mut self, for_stmt: &ForStmt) {
        let Some(binding) = self.validate_target(&for_stmt.variable) else {
            return;
        };
        if binding != TypeBinding::Integer {
            self.report(
                ErrorImpl::TypeMatchError {
                    expected: TypeBinding::Integer,
                    received: binding,
                },
                &for_stmt.variable,
            );
            return;
        }

        self.symbols.lock(&for_stmt.variable.value);
        self.require(&for_stmt.from, TypeBinding::Integer);
        self.require(&for_stmt.to, TypeBinding::Integer);
        self.check_block(&for_stmt.body);
        self.symbols.unlock();
    }

    /// Reports why `identifier` cannot be assigned, or returns its declared binding.
    fn validate_target(&mut self, identifier: &Token) -> Option<TypeBinding> {
        let variable = identifier.value.clone();

        match self.symbols.validate(&variable) {
            Ok(binding) => Some(binding),
            Err(SymbolError::Locked) => {
                self.report(ErrorImpl::VariableLocked { variable }, identifier);
                None
            }
            Err(_) => {
                self.report(ErrorImpl::UndeclaredVariable { variable }, identifier);
                None
            }
        }
    }

    fn require(&mut self, expression: &Expr, expected: TypeBinding) {
        // an inconsistent expression has already been reported
        let Some(received) = self.decide_type(expression) else {
            return;
        };

        if received != expected {
            self.report(ErrorImpl::TypeMatchError { expected, received }, expression.head());
        }
    }

    /// Infers the binding of an expression.
    ///
    /// `None` means the expression is inconsistent. The error is reported at
    /// the first inconsistent node only; enclosing nodes stay silent.
    pub fn decide_type(&mut self, expression: &Expr) -> Option<TypeBinding> {
        match expression {
            Expr::Binary(binary) => {
                let left = self.decide_type(&binary.left);
                let right = self.decide_type(&binary.right);
                let (left, right) = (left?, right?);

                if left != right {
                    self.report(ErrorImpl::OperandTypeMismatch { left, right }, &binary.operator_token);
                    return None;
                }

                self.apply(binary.operator, left, &binary.operator_token)
            }
            Expr::Unary(unary) => {
                let operand = self.decide_type(&unary.operand)?;
                self.apply(unary.operator, operand, &unary.operator_token)
            }
            Expr::Leaf(token) => match token.kind {
                TokenKind::Identifier => {
                    let binding = self.symbols.binding_of(&token.value);
                    if binding.is_none() {
                        self.report(ErrorImpl::UndeclaredVariable { variable: token.value.clone() }, token);
                    }
                    binding
                }
                kind => TypeBinding::from_literal_kind(kind),
            },
        }
    }

    fn apply(&mut self, operator: Operator, binding: TypeBinding, operator_token: &Token) -> Option<TypeBinding> {
        let result = binding.operate(operator);
        if result.is_none() {
            self.report(ErrorImpl::OperatorNotApplicable { operator, binding }, operator_token);
        }
        result
    }

    fn report(&mut self, error_impl: ErrorImpl, token: &Token) {
        self.errors.push(Error::new(error_impl, Some(token.clone())));
    }
}

/// Runs the semantic checks over a parsed program with a fresh symbol table.
#[tracing::instrument(skip_all, fields(statements = ast.statements.len()))]
pub fn type_check(ast: &AbstractSyntaxTree) -> Vec<Error> {
    let errors = TypeChecker::new().check(ast);

    tracing::debug!(errors = errors.len(), "checked program");
    errors
}
