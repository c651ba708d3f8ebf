//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the AST in a single pass:
//!
//! - Identifiers must be declared before they are used or assigned
//! - A for loop's variable may not be assigned or read into inside the loop
//! - Expressions must be type-consistent and match the type their context requires
//!
//! The symbol table is shared in shape with the interpreter, but every stage
//! builds its own instance.

pub mod symbol_table;
pub mod type_checker;
