use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A positioned front-end failure.
///
/// Both lexing and parsing stop at the first error, so a single `Error` is
/// all a caller ever receives.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Which stage produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lex,
    Parse,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_phase(&self) -> ErrorPhase {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorPhase::Parse,
            _ => ErrorPhase::Lex,
        }
    }

    pub fn is_lex_error(&self) -> bool {
        self.get_phase() == ErrorPhase::Lex
    }

    pub fn is_parse_error(&self) -> bool {
        self.get_phase() == ErrorPhase::Parse
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            ErrorImpl::InvalidEscapeSequence { .. } => "InvalidEscapeSequence",
            ErrorImpl::InvalidCharacterLiteral { .. } => "InvalidCharacterLiteral",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::UnknownKeyword { .. } => "UnknownKeyword",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::UnknownSymbol { .. } => "UnknownSymbol",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::InvalidIdentifier { text } => ErrorTip::Suggestion(format!(
                "Invalid identifier `{}`, a sigil must be followed by a letter, digit or underscore",
                text
            )),
            ErrorImpl::InvalidNumber { text, message } => {
                ErrorTip::Suggestion(format!("Invalid number `{}`, {}", text, message))
            }
            ErrorImpl::InvalidEscapeSequence { sequence } => {
                ErrorTip::Suggestion(format!("Invalid escape sequence `\\{}`", sequence))
            }
            ErrorImpl::InvalidCharacterLiteral { text } => ErrorTip::Suggestion(format!(
                "Invalid character literal `'{}`, expected exactly one character",
                text
            )),
            ErrorImpl::UnterminatedLiteral { quote } => ErrorTip::Suggestion(format!(
                "Literal is missing its closing `{}`",
                quote
            )),
            ErrorImpl::UnknownKeyword { word } => {
                ErrorTip::Suggestion(format!("Unknown keyword `{}`", word))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::UnknownSymbol { symbol } => {
                ErrorTip::Suggestion(format!("Unknown symbol `{}`", symbol))
            }
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::None,
            ErrorImpl::UnexpectedToken {
                expected,
                received,
                token,
            } => ErrorTip::Suggestion(format!(
                "Expected {}, received {} `{}`",
                describe_kinds(expected),
                received,
                token
            )),
            ErrorImpl::ExpectedExpression { token } => {
                ErrorTip::Suggestion(format!("Expected an expression, found `{}`", token))
            }
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting is limited to {} levels, split this into smaller pieces",
                limit
            )),
        }
    }
}

fn describe_kinds(kinds: &[TokenKind]) -> String {
    match kinds {
        [single] => single.to_string(),
        _ => format!(
            "one of {}",
            kinds
                .iter()
                .map(|kind| kind.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        ),
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical errors
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("invalid identifier: {text:?}")]
    InvalidIdentifier { text: String },
    #[error("invalid number literal ({message}): {text:?}")]
    InvalidNumber { text: String, message: String },
    #[error("invalid escape sequence: \\{sequence}")]
    InvalidEscapeSequence { sequence: String },
    #[error("invalid character literal: {text:?}")]
    InvalidCharacterLiteral { text: String },
    #[error("unterminated literal, expected closing {quote:?}")]
    UnterminatedLiteral { quote: char },
    #[error("unknown keyword {word:?}")]
    UnknownKeyword { word: String },
    #[error("unknown type {type_:?}")]
    UnknownType { type_: String },
    #[error("unknown symbol {symbol:?}")]
    UnknownSymbol { symbol: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    // Syntax errors
    #[error("unexpected token {token:?}: expected {expected:?}, received {received}")]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        received: TokenKind,
        token: String,
    },
    #[error("expected expression, received {token:?}")]
    ExpectedExpression { token: String },
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}
