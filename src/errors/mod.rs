//! Error types for the front end.
//!
//! This module defines the single positioned error type shared by the
//! lexer and the parser. It includes:
//!
//! - Error structures with source position information
//! - Lexical and syntax error variants
//! - Error names and suggestions used when rendering diagnostics

pub mod errors;
