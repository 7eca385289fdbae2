//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and its entry points. The
//! parser holds a single lookahead token, pulled from the lexer only when a
//! production needs to inspect it.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix and primary expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{AssignmentStmt, BlockStmt, IfStmt, WhileStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::{parse_assignment, parse_block, parse_if, parse_stmt, parse_while},
};

/// How deeply statements and expressions may nest before parsing gives up.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens, consumed on demand
    lexer: Lexer,
    /// The current, not yet consumed token
    lookahead: Option<Token>,
    /// Statements and expressions currently being parsed
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`, with all lookup tables
    /// registered.
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            lookahead: None,
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    pub fn get_file(&self) -> Rc<String> {
        self.lexer.get_file()
    }

    /// Pulls the next token, or an `EOF` token once the input is exhausted.
    fn next_from_lexer(&mut self) -> Result<Token, Error> {
        if self.lexer.has_next() {
            return self.lexer.next_token();
        }

        let position = self.lexer.get_position();
        Ok(MK_TOKEN!(
            TokenKind::EOF,
            String::from("EOF"),
            MK_SPAN!(position.clone(), position)
        ))
    }

    /// Returns the current token without advancing.
    pub fn current_token(&mut self) -> Result<&Token, Error> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.next_from_lexer()?,
        };
        Ok(self.lookahead.insert(token))
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&mut self) -> Result<TokenKind, Error> {
        Ok(self.current_token()?.kind)
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.next_from_lexer(),
        }
    }

    /// Consumes the current token if it is one of `expected_kinds`.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error naming the expected and received kinds.
    pub fn expect_one_of(&mut self, expected_kinds: &[TokenKind]) -> Result<Token, Error> {
        let token = self.current_token()?;
        if !expected_kinds.contains(&token.kind) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kinds.to_vec(),
                    received: token.kind,
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        }

        self.advance()
    }

    /// Consumes the current token if it is of `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_one_of(&[expected_kind])
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&mut self) -> Result<bool, Error> {
        Ok(self.current_token_kind()? != TokenKind::EOF)
    }

    /// Runs `production` one nesting level deeper, failing once the input
    /// nests past `MAX_NESTING_DEPTH`.
    pub fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.current_token()?;
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                token.span.start.clone(),
            ));
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn parse_statement(&mut self) -> Result<Stmt, Error> {
        parse_stmt(self)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, Error> {
        parse_expr(self, BindingPower::Default)
    }

    pub fn parse_if_statement(&mut self) -> Result<IfStmt, Error> {
        parse_if(self)
    }

    pub fn parse_while_statement(&mut self) -> Result<WhileStmt, Error> {
        parse_while(self)
    }

    pub fn parse_assignment_statement(&mut self) -> Result<AssignmentStmt, Error> {
        parse_assignment(self)
    }

    pub fn parse_block(&mut self) -> Result<BlockStmt, Error> {
        parse_block(self)
    }

    /// Parses statements until the input is exhausted, collecting them into
    /// a root block.
    pub fn parse_program(&mut self) -> Result<BlockStmt, Error> {
        let start = Position::new(0, 1, 1, self.get_file());
        let mut body = vec![];

        while self.has_tokens()? {
            body.push(parse_stmt(self)?);
        }

        let end = self.current_token()?.span.end.clone();

        Ok(BlockStmt {
            body,
            span: MK_SPAN!(start, end),
        })
    }
}

/// Parses `source` into a root block of statements.
///
/// This is the main entry point for parsing: it wires a lexer to a parser
/// and reads statements until end of input, failing on the first lexical or
/// syntax error.
pub fn parse(source: &str, file: Option<String>) -> Result<BlockStmt, Error> {
    let mut parser = Parser::new(Lexer::new(source, file));
    parser.parse_program()
}
