use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{AssignmentStmt, BlockStmt, ElseIfClause, IfStmt, WhileStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span, MK_SPAN,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.nested(|parser| {
        let token_kind = parser.current_token_kind()?;
        if let Some(handler) = parser.get_stmt_lookup().get(&token_kind).copied() {
            return handler(parser);
        }

        // Anything else can only be a malformed assignment
        parse_assignment_stmt(parser)
    })
}

/// `'(' Expr ')'`
fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

pub fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parse_condition(parser)?;
    let then_body = Box::new(parse_stmt(parser)?);

    let mut else_ifs = vec![];
    let mut else_body = None;

    while parser.current_token_kind()? == TokenKind::Else {
        let else_start = parser.advance()?.span.start;

        if parser.current_token_kind()? != TokenKind::If {
            else_body = Some(Box::new(parse_stmt(parser)?));
            break;
        }

        parser.advance()?;
        let condition = parse_condition(parser)?;
        let body = Box::new(parse_stmt(parser)?);
        let span = MK_SPAN!(else_start, body.get_span().end.clone());

        else_ifs.push(ElseIfClause {
            condition,
            body,
            span,
        });
    }

    let end = match (&else_body, else_ifs.last()) {
        (Some(body), _) => body.get_span().end.clone(),
        (None, Some(clause)) => clause.span.end.clone(),
        (None, None) => then_body.get_span().end.clone(),
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_ifs,
        else_body,
        span: MK_SPAN!(start, end),
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::While(parse_while(parser)?))
}

pub fn parse_while(parser: &mut Parser) -> Result<WhileStmt, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;

    let condition = parse_condition(parser)?;
    let body = Box::new(parse_stmt(parser)?);
    let span = MK_SPAN!(start, body.get_span().end.clone());

    Ok(WhileStmt {
        condition,
        body,
        span,
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = vec![];
    loop {
        let token_kind = parser.current_token_kind()?;
        if token_kind == TokenKind::CloseCurly || token_kind == TokenKind::EOF {
            break;
        }
        body.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(BlockStmt {
        body,
        span: MK_SPAN!(start, end),
    })
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Assignment(parse_assignment(parser)?))
}

pub fn parse_assignment(parser: &mut Parser) -> Result<AssignmentStmt, Error> {
    let identifier = parser.expect_one_of(&TokenKind::IDENTIFIERS)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    Ok(AssignmentStmt {
        span: MK_SPAN!(identifier.span.start.clone(), end),
        identifier,
        value,
    })
}
