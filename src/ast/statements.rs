use serde::Serialize;

use crate::{lexer::tokens::Token, Span};

use super::ast::{Expr, Stmt};

/// `{ ... }`, an ordered and possibly empty statement list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// `identifier = value;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentStmt {
    pub identifier: Token,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    /// `else if` clauses in source order.
    pub else_ifs: Vec<ElseIfClause>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseIfClause {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}
