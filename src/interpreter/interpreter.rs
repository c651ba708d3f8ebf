use std::io::{BufRead, Write};

use crate::{
    ast::{
        ast::{AbstractSyntaxTree, Expr, Stmt},
        statements::{AssertStmt, BlockStmt, ForStmt, VarDeclStmt},
        types::TypeBinding,
    },
    errors::errors::FatalError,
    lexer::tokens::{Operator, Token, TokenKind},
    type_checker::symbol_table::{SymbolError, SymbolTable},
};

use super::value::{Value, BINARY_IMPLEMENTATIONS, UNARY_IMPLEMENTATIONS};

/// Tree-walking interpreter over a checked program.
///
/// The interpreter trusts the analyzer but still checks every value against
/// the binding it is supposed to have; a disagreement ends the run with a
/// [`FatalError`] instead of storing a value of the wrong type.
pub struct Interpreter<R, W> {
    symbols: SymbolTable<Value>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Interpreter {
            symbols: SymbolTable::new(),
            input,
            output,
        }
    }

    pub fn run(&mut self, ast: &AbstractSyntaxTree) -> Result<(), FatalError> {
        let result = self.execute_block(&ast.statements);
        self.output.flush()?;
        result
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn execute_block(&mut self, block: &BlockStmt) -> Result<(), FatalError> {
        for stmt in block.iter() {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), FatalError> {
        match stmt {
            Stmt::VarDecl(declaration) => self.declare(declaration),
            Stmt::Assignment(assignment) => {
                let binding = self.target(&assignment.identifier)?;
                let value = self.evaluate(&assignment.expression)?;
                expect_binding(binding, &value)?;

                let variable = &assignment.identifier.value;
                self.symbols.assign(variable, value).map_err(|error| symbol_fault(error, variable))
            }
            Stmt::For(for_stmt) => self.execute_for(for_stmt),
            Stmt::Print(print) => {
                let value = self.evaluate(&print.expression)?;
                write!(self.output, "{}", value)?;
                Ok(())
            }
            Stmt::Read(read) => {
                let binding = self.target(&read.identifier)?;
                let word = self.read_word()?;
                let value = Value::parse(binding, &word).ok_or(FatalError::InvalidInput { input: word, binding })?;

                let variable = &read.identifier.value;
                self.symbols.assign(variable, value).map_err(|error| symbol_fault(error, variable))
            }
            Stmt::Assert(assert) => self.execute_assert(assert),
        }
    }

    /// Declares a variable with its zero value, then stores the initializer.
    /// A declaration inside a loop body is met again on every later
    /// iteration and starts over from the zero value each time.
    fn declare(&mut self, declaration: &VarDeclStmt) -> Result<(), FatalError> {
        let binding = declaration.binding;
        let variable = &declaration.identifier.value;
        let zero = Value::zero(binding);

        match self.symbols.declare(variable, binding, zero.clone()) {
            Err(SymbolError::AlreadyDeclared) if self.symbols.in_loop() => {
                expect_binding(self.target(&declaration.identifier)?, &zero)?;
                self.symbols.assign(variable, zero).map_err(|error| symbol_fault(error, variable))?;
            }
            result => result.map_err(|error| symbol_fault(error, variable))?,
        }

        if let Some(expression) = &declaration.expression {
            let value = self.evaluate(expression)?;
            expect_binding(binding, &value)?;
            self.symbols.assign(variable, value).map_err(|error| symbol_fault(error, variable))?;
        }

        Ok(())
    }

    /// Runs the body once per value of `[from, to]`, ascending. The loop
    /// variable stays locked while the body runs, also when it fails.
    fn execute_for(&mut self, for_stmt: &ForStmt) -> Result<(), FatalError> {
        let binding = self.target(&for_stmt.variable)?;
        if binding != TypeBinding::Integer {
            return Err(FatalError::TypeAssertion {
                expected: TypeBinding::Integer,
                received: binding,
            });
        }

        let from = self.evaluate_integer(&for_stmt.from)?;
        let to = self.evaluate_integer(&for_stmt.to)?;
        let variable = &for_stmt.variable.value;

        self.symbols.lock(variable);
        let result = (from..=to).try_for_each(|counter| {
            self.symbols
                .set_locked(variable, Value::Int(counter))
                .map_err(|error| symbol_fault(error, variable))?;
            self.execute_block(&for_stmt.body)
        });
        self.symbols.unlock();

        result
    }

    fn execute_assert(&mut self, assert: &AssertStmt) -> Result<(), FatalError> {
        let value = self.evaluate(&assert.assertion)?;
        expect_binding(TypeBinding::Boolean, &value)?;

        if value == Value::Bool(false) {
            writeln!(
                self.output,
                "Assertion near line {} column {} failed: {}",
                assert.location.line, assert.location.column, assert.source
            )?;
        }

        Ok(())
    }

    /// Binding of an assignment target, which must be declared and unlocked.
    fn target(&self, identifier: &Token) -> Result<TypeBinding, FatalError> {
        self.symbols
            .validate(&identifier.value)
            .map_err(|error| symbol_fault(error, &identifier.value))
    }

    fn evaluate_integer(&self, expression: &Expr) -> Result<i64, FatalError> {
        match self.evaluate(expression)? {
            Value::Int(value) => Ok(value),
            other => Err(FatalError::TypeAssertion {
                expected: TypeBinding::Integer,
                received: other.binding(),
            }),
        }
    }

    /// Evaluates an expression, dispatching operators through the
    /// implementation tables of the operand's binding.
    pub fn evaluate(&self, expression: &Expr) -> Result<Value, FatalError> {
        match expression {
            Expr::Binary(binary) => {
                let left = self.evaluate(&binary.left)?;
                let right = self.evaluate(&binary.right)?;

                let binding = left.binding();
                expect_binding(binding, &right)?;
                let result = transition(binding, binary.operator)?;

                let implementation = BINARY_IMPLEMENTATIONS
                    .get(&(binding, binary.operator))
                    .ok_or(FatalError::MissingImplementation { operator: binary.operator, binding })?;
                let value = implementation(&left, &right).ok_or(FatalError::DivisionByZero {
                    line: binary.operator_token.line,
                    column: binary.operator_token.column,
                })?;

                expect_binding(result, &value)?;
                Ok(value)
            }
            Expr::Unary(unary) => {
                let operand = self.evaluate(&unary.operand)?;

                let binding = operand.binding();
                let result = transition(binding, unary.operator)?;

                let implementation = UNARY_IMPLEMENTATIONS
                    .get(&(binding, unary.operator))
                    .ok_or(FatalError::MissingImplementation { operator: unary.operator, binding })?;
                let value = implementation(&operand)
                    .ok_or(FatalError::MissingImplementation { operator: unary.operator, binding })?;

                expect_binding(result, &value)?;
                Ok(value)
            }
            Expr::Leaf(token) => self.evaluate_leaf(token),
        }
    }

    fn evaluate_leaf(&self, token: &Token) -> Result<Value, FatalError> {
        let invalid = || FatalError::InvalidLeaf {
            token: token.value.clone(),
        };

        match token.kind {
            TokenKind::Identifier => self.symbols.get(&token.value).cloned().ok_or_else(|| {
                FatalError::UndeclaredAtRuntime {
                    variable: token.value.clone(),
                }
            }),
            kind => {
                let binding = TypeBinding::from_literal_kind(kind).ok_or_else(invalid)?;
                Value::parse(binding, &token.value).ok_or_else(invalid)
            }
        }
    }

    /// Reads one whitespace-delimited word from the input. The whitespace
    /// ending the word is consumed with it.
    fn read_word(&mut self) -> Result<String, FatalError> {
        let mut word: Vec<u8> = vec![];

        loop {
            let buffer = self.input.fill_buf()?;
            if buffer.is_empty() {
                break;
            }

            let mut consumed = 0;
            let mut finished = false;
            for byte in buffer {
                consumed += 1;
                if byte.is_ascii_whitespace() {
                    if word.is_empty() {
                        continue;
                    }
                    finished = true;
                    break;
                }
                word.push(*byte);
            }

            self.input.consume(consumed);
            if finished {
                break;
            }
        }

        if word.is_empty() {
            return Err(FatalError::InputExhausted);
        }

        Ok(String::from_utf8_lossy(&word).into_owned())
    }
}

fn transition(binding: TypeBinding, operator: Operator) -> Result<TypeBinding, FatalError> {
    binding
        .operate(operator)
        .ok_or(FatalError::MissingImplementation { operator, binding })
}

fn expect_binding(expected: TypeBinding, value: &Value) -> Result<(), FatalError> {
    let received = value.binding();
    if received != expected {
        return Err(FatalError::TypeAssertion { expected, received });
    }
    Ok(())
}

fn symbol_fault(error: SymbolError, variable: &str) -> FatalError {
    let variable = String::from(variable);
    match error {
        SymbolError::AlreadyDeclared => FatalError::RedeclaredAtRuntime { variable },
        SymbolError::Undeclared => FatalError::UndeclaredAtRuntime { variable },
        SymbolError::Locked => FatalError::LockedAtRuntime { variable },
    }
}

/// Executes a checked program, reading `read` input from `input` and writing
/// `print` output and failed assertions to `output`.
#[tracing::instrument(skip_all, fields(statements = ast.statements.len()))]
pub fn interpret<R: BufRead, W: Write>(ast: &AbstractSyntaxTree, input: R, output: W) -> Result<(), FatalError> {
    let mut interpreter = Interpreter::new(input, output);
    let result = interpreter.run(ast);

    if let Err(fatal) = &result {
        tracing::debug!(error = %fatal, "run aborted");
    }
    result
}
