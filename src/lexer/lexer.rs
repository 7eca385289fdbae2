use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::tokens::{
    IdentifierKind, Token, TokenKind, RESERVED_LOOKUP, SYMBOL_LOOKUP, TYPE_LOOKUP,
};

/// Pull-based scanner producing one token per `next_token` call.
#[derive(Clone)]
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_symbol_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '^' | ';' | '&' | '|' | '{' | '}' | '[' | ']' | '(' | ')' | '='
            | '!' | '%'
    )
}

fn is_octal_digit(c: char) -> bool {
    ('0'..='7').contains(&c)
}

fn is_binary_digit(c: char) -> bool {
    c == '0' || c == '1'
}

fn is_int_suffix(c: char) -> bool {
    matches!(c, 'u' | 'U' | 'l' | 'L')
}

fn is_float_suffix(c: char) -> bool {
    matches!(c, 'f' | 'F' | 'l' | 'L')
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Returns true while any non-whitespace input remains.
    pub fn has_next(&self) -> bool {
        self.source[self.pos..].iter().any(|c| !is_whitespace(*c))
    }

    pub fn get_position(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column, Rc::clone(&self.file))
    }

    fn at(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.source.get(self.pos + n).copied()
    }

    fn at_is(&self, predicate: impl Fn(char) -> bool) -> bool {
        self.at().is_some_and(predicate)
    }

    fn advance(&mut self) {
        if let Some(c) = self.at() {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes the current character into `text`.
    fn take(&mut self, text: &mut String) {
        if let Some(c) = self.at() {
            text.push(c);
            self.advance();
        }
    }

    /// Consumes every character matching `predicate` into `text`.
    fn take_while(&mut self, text: &mut String, predicate: impl Fn(char) -> bool) {
        while self.at_is(&predicate) {
            self.take(text);
        }
    }

    fn span_from(&self, start: Position) -> Span {
        MK_SPAN!(start, self.get_position())
    }

    fn number_error(&self, text: &str, message: &str, start: Position) -> Error {
        Error::new(
            ErrorImpl::InvalidNumber {
                text: String::from(text),
                message: String::from(message),
            },
            start,
        )
    }

    fn unterminated(&self, quote: char) -> Error {
        Error::new(ErrorImpl::UnterminatedLiteral { quote }, self.get_position())
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        while self.at_is(is_whitespace) {
            self.advance();
        }

        let Some(c) = self.at() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedEndOfInput,
                self.get_position(),
            ));
        };

        match c {
            '%' if !self.peek(1).is_some_and(is_identifier_part) => self.symbol(),
            sigil @ ('$' | '@' | '%') => self.identifier(sigil),
            '.' => self.number(),
            c if c.is_ascii_digit() => self.number(),
            '"' => self.string_literal(),
            '\'' => self.char_literal(),
            c if is_symbol_char(c) => self.symbol(),
            c if c.is_ascii_uppercase() => self.type_name(),
            c if c.is_ascii_lowercase() => self.keyword(),
            c => Err(Error::new(
                ErrorImpl::UnrecognisedCharacter { character: c },
                self.get_position(),
            )),
        }
    }

    fn identifier(&mut self, sigil: char) -> Result<Token, Error> {
        let start = self.get_position();
        let mut text = String::new();

        let kind = IdentifierKind::from_sigil(sigil).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnrecognisedCharacter { character: sigil },
                start.clone(),
            )
        })?;
        self.take(&mut text);

        let Some(first) = self.at().filter(|c| is_identifier_part(*c)) else {
            return Err(Error::new(ErrorImpl::InvalidIdentifier { text }, start));
        };
        self.take(&mut text);
        self.take_while(&mut text, is_identifier_part);

        let kind = kind.token_kind(first == '_');
        Ok(MK_TOKEN!(kind, text, self.span_from(start)))
    }

    fn keyword(&mut self) -> Result<Token, Error> {
        let start = self.get_position();
        let mut text = String::new();
        self.take_while(&mut text, |c| c.is_ascii_lowercase());

        match RESERVED_LOOKUP.get(text.as_str()) {
            Some(kind) => Ok(MK_TOKEN!(*kind, text, self.span_from(start))),
            None => Err(Error::new(ErrorImpl::UnknownKeyword { word: text }, start)),
        }
    }

    fn type_name(&mut self) -> Result<Token, Error> {
        let start = self.get_position();
        let mut text = String::new();
        self.take(&mut text);
        self.take_while(&mut text, |c| c.is_ascii_alphabetic());

        match TYPE_LOOKUP.get(text.as_str()) {
            Some(kind) => Ok(MK_TOKEN!(*kind, text, self.span_from(start))),
            None => Err(Error::new(ErrorImpl::UnknownType { type_: text }, start)),
        }
    }

    /// Greedily collects symbol characters, then gives back trailing
    /// characters until the remainder is a known symbol.
    fn symbol(&mut self) -> Result<Token, Error> {
        let start = self.get_position();

        let mut len = 1;
        while self.peek(len).is_some_and(is_symbol_char) {
            len += 1;
        }

        let candidate: String = self.source[self.pos..self.pos + len].iter().collect();
        let mut text = candidate.clone();

        while !text.is_empty() {
            if let Some(kind) = SYMBOL_LOOKUP.get(text.as_str()) {
                for _ in 0..text.chars().count() {
                    self.advance();
                }
                return Ok(MK_TOKEN!(*kind, text, self.span_from(start)));
            }
            text.pop();
        }

        let first = candidate.chars().next().map(String::from).unwrap_or_default();
        Err(Error::new(ErrorImpl::UnknownSymbol { symbol: first }, start))
    }

    // NUMBERS

    fn number(&mut self) -> Result<Token, Error> {
        let start = self.get_position();
        let mut text = String::new();

        match (self.at(), self.peek(1)) {
            (Some('.'), _) => {
                self.take(&mut text);
                self.decimal_digits(&mut text, &start)?;
                self.optional_exponent(&mut text, &start)?;
                self.optional_float_suffix(&mut text);
                Ok(MK_TOKEN!(TokenKind::FloatingPointLiteral, text, self.span_from(start)))
            }
            (Some('0'), Some('x' | 'X')) => {
                self.take(&mut text);
                self.take(&mut text);
                self.hexadecimal(text, start)
            }
            (Some('0'), Some('b' | 'B')) => {
                self.take(&mut text);
                self.take(&mut text);
                self.binary(text, start)
            }
            (Some('0'), _) => {
                self.take(&mut text);
                self.octal_or_decimal(text, start)
            }
            _ => {
                self.take_while(&mut text, |c| c.is_ascii_digit());
                self.decimal_tail(text, start)
            }
        }
    }

    /// Mandatory run of decimal digits.
    fn decimal_digits(&mut self, text: &mut String, start: &Position) -> Result<(), Error> {
        if !self.at_is(|c| c.is_ascii_digit()) {
            return Err(self.number_error(text, "expected a decimal digit", start.clone()));
        }
        self.take_while(text, |c| c.is_ascii_digit());
        Ok(())
    }

    /// `e`/`E` (or `p`/`P` for hex floats), optional sign, mandatory digits.
    fn exponent(&mut self, text: &mut String, start: &Position) -> Result<(), Error> {
        self.take(text);
        if self.at_is(|c| c == '+' || c == '-') {
            self.take(text);
        }
        self.decimal_digits(text, start)
    }

    fn optional_exponent(&mut self, text: &mut String, start: &Position) -> Result<(), Error> {
        if self.at_is(|c| c == 'e' || c == 'E') {
            self.exponent(text, start)?;
        }
        Ok(())
    }

    fn hex_exponent(&mut self, text: &mut String, start: &Position) -> Result<(), Error> {
        if !self.at_is(|c| c == 'p' || c == 'P') {
            return Err(self.number_error(
                text,
                "hexadecimal floating-point literals require a `p` exponent",
                start.clone(),
            ));
        }
        self.exponent(text, start)
    }

    fn optional_float_suffix(&mut self, text: &mut String) {
        if self.at_is(is_float_suffix) {
            self.take(text);
        }
    }

    /// `[uU]? (l|L|ll|LL)?` or `(l|L|ll|LL) [uU]?`; the current character
    /// must already be a suffix character.
    fn int_suffix(&mut self, text: &mut String) {
        if self.at_is(|c| c == 'u' || c == 'U') {
            self.take(text);
            self.length_suffix(text);
        } else {
            self.length_suffix(text);
            if self.at_is(|c| c == 'u' || c == 'U') {
                self.take(text);
            }
        }
    }

    fn length_suffix(&mut self, text: &mut String) {
        if let Some(l) = self.at().filter(|c| *c == 'l' || *c == 'L') {
            self.take(text);
            if self.at() == Some(l) {
                self.take(text);
            }
        }
    }

    fn float_token(&mut self, mut text: String, start: Position) -> Result<Token, Error> {
        self.optional_float_suffix(&mut text);
        Ok(MK_TOKEN!(TokenKind::FloatingPointLiteral, text, self.span_from(start)))
    }

    fn int_token(&mut self, mut text: String, start: Position) -> Result<Token, Error> {
        if self.at_is(is_int_suffix) {
            self.int_suffix(&mut text);
        }
        Ok(MK_TOKEN!(TokenKind::IntegerLiteral, text, self.span_from(start)))
    }

    /// Continues a decimal literal after its integer digits.
    fn decimal_tail(&mut self, mut text: String, start: Position) -> Result<Token, Error> {
        match self.at() {
            Some('e' | 'E') => {
                self.exponent(&mut text, &start)?;
                self.float_token(text, start)
            }
            Some('.') => {
                self.take(&mut text);
                self.take_while(&mut text, |c| c.is_ascii_digit());
                self.optional_exponent(&mut text, &start)?;
                self.float_token(text, start)
            }
            _ => self.int_token(text, start),
        }
    }

    /// A leading `0` starts an octal literal until an `8` or `9` shows it
    /// to be decimal.
    fn octal_or_decimal(&mut self, mut text: String, start: Position) -> Result<Token, Error> {
        self.take_while(&mut text, is_octal_digit);

        if self.at_is(|c| c.is_ascii_digit()) {
            self.take_while(&mut text, |c| c.is_ascii_digit());

            // Once promoted to decimal, a float suffix alone makes a float
            if self.at_is(is_float_suffix) && !self.at_is(is_int_suffix) {
                return self.float_token(text, start);
            }
        }

        self.decimal_tail(text, start)
    }

    fn binary(&mut self, mut text: String, start: Position) -> Result<Token, Error> {
        if !self.at_is(is_binary_digit) {
            return Err(self.number_error(&text, "expected a binary digit", start));
        }
        self.take_while(&mut text, is_binary_digit);
        self.int_token(text, start)
    }

    fn hexadecimal(&mut self, mut text: String, start: Position) -> Result<Token, Error> {
        if self.at() == Some('.') {
            self.take(&mut text);
            if !self.at_is(|c| c.is_ascii_hexdigit()) {
                return Err(self.number_error(&text, "expected a hexadecimal digit", start));
            }
            self.take_while(&mut text, |c| c.is_ascii_hexdigit());
            self.hex_exponent(&mut text, &start)?;
            return self.float_token(text, start);
        }

        if !self.at_is(|c| c.is_ascii_hexdigit()) {
            return Err(self.number_error(&text, "expected a hexadecimal digit", start));
        }
        self.take_while(&mut text, |c| c.is_ascii_hexdigit());

        match self.at() {
            Some('p' | 'P') => {
                self.hex_exponent(&mut text, &start)?;
                self.float_token(text, start)
            }
            Some('.') => {
                self.take(&mut text);
                self.take_while(&mut text, |c| c.is_ascii_hexdigit());
                self.hex_exponent(&mut text, &start)?;
                self.float_token(text, start)
            }
            _ => self.int_token(text, start),
        }
    }

    // STRINGS AND CHARACTERS

    fn string_literal(&mut self) -> Result<Token, Error> {
        let start = self.get_position();
        self.advance();

        let mut text = String::new();
        loop {
            match self.at() {
                None => return Err(self.unterminated('"')),
                Some('"') => break,
                Some(_) => self.literal_unit(&mut text, '"')?,
            }
        }
        self.advance();

        Ok(MK_TOKEN!(TokenKind::StringLiteral, text, self.span_from(start)))
    }

    fn char_literal(&mut self) -> Result<Token, Error> {
        let start = self.get_position();
        self.advance();

        let mut text = String::new();
        match self.at() {
            None => return Err(self.unterminated('\'')),
            Some('\'') => {
                return Err(Error::new(ErrorImpl::InvalidCharacterLiteral { text }, start))
            }
            Some(_) => self.literal_unit(&mut text, '\'')?,
        }

        match self.at() {
            Some('\'') => self.advance(),
            None => return Err(self.unterminated('\'')),
            Some(_) => {
                self.take(&mut text);
                return Err(Error::new(ErrorImpl::InvalidCharacterLiteral { text }, start));
            }
        }

        Ok(MK_TOKEN!(TokenKind::CharacterLiteral, text, self.span_from(start)))
    }

    /// One character or escape sequence, kept exactly as written.
    fn literal_unit(&mut self, text: &mut String, quote: char) -> Result<(), Error> {
        if self.at() != Some('\\') {
            self.take(text);
            return Ok(());
        }

        let escape_start = self.get_position();
        self.take(text);

        let Some(c) = self.at() else {
            return Err(self.unterminated(quote));
        };

        match c {
            'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' | '?' | 'a' | '\'' | '"' => {
                self.take(text);
                Ok(())
            }
            'x' => {
                self.take(text);
                if !self.at_is(|c| c.is_ascii_hexdigit()) {
                    return Err(Error::new(
                        ErrorImpl::InvalidEscapeSequence {
                            sequence: String::from("x"),
                        },
                        escape_start,
                    ));
                }
                self.take_while(text, |c| c.is_ascii_hexdigit());
                Ok(())
            }
            'u' | 'U' => {
                let digits = if c == 'u' { 4 } else { 8 };
                let mut sequence = String::new();
                self.take(&mut sequence);
                for _ in 0..digits {
                    if !self.at_is(|c| c.is_ascii_hexdigit()) {
                        return Err(Error::new(
                            ErrorImpl::InvalidEscapeSequence { sequence },
                            escape_start,
                        ));
                    }
                    self.take(&mut sequence);
                }
                text.push_str(&sequence);
                Ok(())
            }
            c if is_octal_digit(c) => {
                self.take(text);
                for _ in 0..2 {
                    if !self.at_is(is_octal_digit) {
                        break;
                    }
                    self.take(text);
                }
                Ok(())
            }
            c => Err(Error::new(
                ErrorImpl::InvalidEscapeSequence {
                    sequence: c.to_string(),
                },
                escape_start,
            )),
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }

        let result = self.next_token();
        if result.is_err() {
            // Nothing after the first error is meaningful.
            self.pos = self.source.len();
        }
        Some(result)
    }
}

/// Scans the whole of `source` into a token list, stopping at the first error.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source, file).collect()
}
