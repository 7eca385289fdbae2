//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens on demand. It handles:
//!
//! - Sigil identifiers (`$`, `@`, `%`) with public/private visibility
//! - Integer and floating-point literals in decimal, octal, hex and binary
//! - String and character literals, keeping escape sequences as written
//! - Symbols, keywords and built-in type names
//! - Line/column tracking for error reporting

pub mod lexer;
pub mod tokens;
