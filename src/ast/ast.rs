use serde::Serialize;

use crate::{lexer::tokens::Token, Span};

use super::{
    expressions::{BinaryExpr, CallExpr, LiteralExpr, PrefixExpr},
    statements::{AssignmentStmt, BlockStmt, IfStmt, WhileStmt},
};

/// Statement Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum StmtType {
    BlockStmt,
    AssignmentStmt,
    IfStmt,
    WhileStmt,
}

/// A statement node.
///
/// Statements own their children; the tree has no sharing and no cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Block(BlockStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    While(WhileStmt),
}

impl Stmt {
    /// Returns the type of the statement.
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::Assignment(_) => StmtType::AssignmentStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::While(_) => StmtType::WhileStmt,
        }
    }

    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    Binary,
    Prefix,
    Literal,
    Call,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Literal(LiteralExpr),
    Call(CallExpr),
}

impl Expr {
    /// Returns the expression type of the expression.
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Binary(_) => ExprType::Binary,
            Expr::Prefix(_) => ExprType::Prefix,
            Expr::Literal(_) => ExprType::Literal,
            Expr::Call(_) => ExprType::Call,
        }
    }

    /// Returns the operator, literal or identifier token that produced the
    /// expression.
    pub fn get_token(&self) -> &Token {
        match self {
            Expr::Binary(expr) => &expr.operator,
            Expr::Prefix(expr) => &expr.operator,
            Expr::Literal(expr) => &expr.token,
            Expr::Call(expr) => &expr.callee,
        }
    }
}
