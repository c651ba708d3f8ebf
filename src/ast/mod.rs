/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The tree root and the statement/expression sum types
/// - expressions: Payloads of the expression variants
/// - statements: Payloads of the statement variants
/// - types: The type-binding graph shared by the checker and the interpreter
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
