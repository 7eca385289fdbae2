use lazy_static::lazy_static;
use serde::Serialize;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("while", TokenKind::While);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map
    };

    pub static ref TYPE_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("String", TokenKind::TypeString);
        map.insert("Integer", TokenKind::TypeInteger);
        map.insert("Character", TokenKind::TypeCharacter);
        map.insert("Float", TokenKind::TypeFloat);
        map.insert("Void", TokenKind::TypeVoid);
        map
    };

    pub static ref SYMBOL_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("(", TokenKind::OpenParen);
        map.insert(")", TokenKind::CloseParen);
        map.insert("[", TokenKind::OpenBracket);
        map.insert("]", TokenKind::CloseBracket);
        map.insert("{", TokenKind::OpenCurly);
        map.insert("}", TokenKind::CloseCurly);
        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Dash);
        map.insert("*", TokenKind::Star);
        map.insert("/", TokenKind::Slash);
        map.insert("%", TokenKind::Percent);
        map.insert("&&", TokenKind::And);
        map.insert("||", TokenKind::Or);
        map.insert("!", TokenKind::Not);
        map.insert("=", TokenKind::Assignment);
        map.insert(";", TokenKind::Semicolon);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    EOF,

    // Identifiers
    IdPublicScalar,
    IdPrivateScalar,
    IdPublicArray,
    IdPrivateArray,
    IdPublicHash,
    IdPrivateHash,

    // Literals
    IntegerLiteral,
    FloatingPointLiteral,
    StringLiteral,
    CharacterLiteral,

    // Built-in type names
    TypeString,
    TypeInteger,
    TypeCharacter,
    TypeFloat,
    TypeVoid,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Not,        // !

    Or,
    And,

    Semicolon,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    If,
    Else,
    While,
}

impl TokenKind {
    pub const IDENTIFIERS: [TokenKind; 6] = [
        TokenKind::IdPublicScalar,
        TokenKind::IdPrivateScalar,
        TokenKind::IdPublicArray,
        TokenKind::IdPrivateArray,
        TokenKind::IdPublicHash,
        TokenKind::IdPrivateHash,
    ];

    pub const LITERALS: [TokenKind; 4] = [
        TokenKind::IntegerLiteral,
        TokenKind::FloatingPointLiteral,
        TokenKind::StringLiteral,
        TokenKind::CharacterLiteral,
    ];

    pub fn is_identifier(&self) -> bool {
        TokenKind::IDENTIFIERS.contains(self)
    }

    pub fn is_literal(&self) -> bool {
        TokenKind::LITERALS.contains(self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Variable kind, selected by the sigil.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IdentifierKind {
    Scalar,
    Array,
    Hash,
}

impl IdentifierKind {
    pub fn from_sigil(sigil: char) -> Option<IdentifierKind> {
        match sigil {
            '$' => Some(IdentifierKind::Scalar),
            '@' => Some(IdentifierKind::Array),
            '%' => Some(IdentifierKind::Hash),
            _ => None,
        }
    }

    /// Combines the kind with its visibility into the matching token kind.
    pub fn token_kind(&self, private: bool) -> TokenKind {
        match (self, private) {
            (IdentifierKind::Scalar, false) => TokenKind::IdPublicScalar,
            (IdentifierKind::Scalar, true) => TokenKind::IdPrivateScalar,
            (IdentifierKind::Array, false) => TokenKind::IdPublicArray,
            (IdentifierKind::Array, true) => TokenKind::IdPrivateArray,
            (IdentifierKind::Hash, false) => TokenKind::IdPublicHash,
            (IdentifierKind::Hash, true) => TokenKind::IdPrivateHash,
        }
    }
}

/// A scanned token.
///
/// `value` is the exact matched text. String and character literals store
/// only the text between the quotes, with escape sequences left undecoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.kind, self.span.start, self.value)
    }
}

impl Token {
    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    /// The token as it appeared in the source, quotes included.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::StringLiteral => format!("\"{}\"", self.value),
            TokenKind::CharacterLiteral => format!("'{}'", self.value),
            _ => self.value.clone(),
        }
    }
}
