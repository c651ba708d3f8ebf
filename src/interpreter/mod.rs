//! Tree-walking interpreter.
//!
//! Runs a program that passed semantic analysis. Operators are dispatched
//! through implementation tables keyed by the same type-binding graph the
//! analyzer checks against, so the two stages cannot disagree on what an
//! operator accepts.

pub mod interpreter;
pub mod value;

#[cfg(test)]
mod tests;
