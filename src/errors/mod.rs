//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout the pipeline:
//!
//! - Diagnostics (lexical, syntax, semantic) anchored on a token
//! - The per-kind container every stage reports into
//! - Fatal errors for invariant violations and run-time faults

pub mod errors;
