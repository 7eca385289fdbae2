use serde::Serialize;

use crate::lexer::tokens::Token;

use super::ast::Expr;

/// Binary Expression
/// `left operator right`, where `operator` is the token actually matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub operator: Token,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Prefix Expression
/// Logical negation of `right`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Literal Expression
/// Wraps a literal or a bare identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralExpr {
    pub token: Token,
}

/// Call Expression
/// A call with no arguments, `callee()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Token,
}
