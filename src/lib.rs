#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use serde::Serialize;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// A point in the source text.
///
/// `offset` counts characters from the start of the input, `line` and
/// `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, file: Rc<String>) -> Self {
        Position {
            offset,
            line,
            column,
            file,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}, {}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the text of the 1-based `line` of `source`, without its line break.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Renders a diagnostic for `error` against the source it was produced from.
pub fn display_error(error: &Error, source: &str) -> String {
    /*
        Error: UnexpectedToken (expected [Semicolon], received `}`)
        -> script.sg
           |
        20 | $a = 1 }
           | -------^
    */

    let position = error.get_position();
    let line_text = get_line_at_position(source, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::errors::errors::{Error, ErrorImpl};

    use super::{display_error, get_line_at_position, Position};

    #[test]
    fn test_get_line_at_position() {
        let content = include_str!("../tests/test_file.txt");

        assert_eq!(get_line_at_position(content, 1), Some("Hello, world!"));
        assert_eq!(get_line_at_position(content, 4), Some("Testing { }"));
        assert_eq!(get_line_at_position(content, 0), None);
        assert_eq!(get_line_at_position(content, 99), None);
    }

    #[test]
    fn test_get_line_strips_carriage_return() {
        assert_eq!(get_line_at_position("a\r\nb\r\n", 1), Some("a"));
        assert_eq!(get_line_at_position("a\r\nb\r\n", 2), Some("b"));
    }

    #[test]
    fn test_position_display() {
        let position = Position::new(4, 2, 3, Rc::new(String::from("main.sg")));
        assert_eq!(position.to_string(), "main.sg: 2, 3");
    }

    #[test]
    fn test_display_error_points_at_column() {
        let source = "{\n    $a = ^;\n}";
        let error = Error::new(
            ErrorImpl::UnknownSymbol {
                symbol: String::from("^"),
            },
            Position::new(11, 2, 10, Rc::new(String::from("main.sg"))),
        );

        let rendered = display_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: UnknownSymbol (Unknown symbol `^`)");
        assert_eq!(lines[1], "-> main.sg");
        assert_eq!(lines[3], "2 | $a = ^;");
        assert_eq!(lines[4], "  | -----^");
    }
}
