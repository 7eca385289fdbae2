use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, CallExpr, LiteralExpr, PrefixExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| {
        // First parse NUD
        let token_kind = parser.current_token_kind()?;
        let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
            let token = parser.current_token()?;
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        };

        let mut left = nud(parser)?;

        // While the next operator binds tighter than bp, keep folding it into lhs
        loop {
            let token_kind = parser.current_token_kind()?;
            let Some(next_bp) = parser.get_bp_lookup().get(&token_kind).copied() else {
                break;
            };
            if next_bp <= bp {
                break;
            }
            let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
                break;
            };

            left = led(parser, left, next_bp)?;
        }

        Ok(left)
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance()?;
    Ok(Expr::Literal(LiteralExpr { token }))
}

/// A bare identifier, or a call when `()` follows it directly.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let identifier = parser.advance()?;

    if parser.current_token_kind()? == TokenKind::OpenParen {
        parser.advance()?;
        parser.expect(TokenKind::CloseParen)?;
        return Ok(Expr::Call(CallExpr { callee: identifier }));
    }

    Ok(Expr::Literal(LiteralExpr { token: identifier }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance()?;
    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance()?;
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}
