//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the lexer one at
//! a time and assembles them into an Abstract Syntax Tree. It handles:
//!
//! - Statement parsing (assignments, `if`/`else if`/`else`, `while`, blocks)
//! - Expression parsing (logical, additive and multiplicative operators,
//!   logical negation, literals, identifiers, no-argument calls, grouping)
//!
//! Expressions are parsed with NUD (null denotation) and LED (left
//! denotation) handlers, using binding power for precedence. Parsing stops
//! at the first error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
