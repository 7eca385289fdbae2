//! Integration tests for the front end.
//!
//! These tests drive the public API end to end, from source text through
//! tokenization and parsing to the syntax tree.

use sigil::{
    ast::ast::{Expr, Stmt, StmtType},
    display_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::parser::{parse, Parser},
};

const PROGRAM: &str = r#"
{
    $_count = 0x1F;
    @names = "a\tb\x41";
    %table = 'z';
    while ($_count && !$done()) {
        $_count = $_count - 1 * .5e-1f;
        if (($_count / 2) % 2) $flag = 0b1010u;
        else if ($_count) { }
        else $flag = 0778 + 1.5e10f + 0x1.8p3;
    }
    $type = 017LL || $x;
}
"#;

#[test]
fn test_parse_full_program() {
    let program = parse(PROGRAM, Some("program.sg".to_string())).unwrap();

    assert_eq!(program.len(), 1);
    let Stmt::Block(block) = &program.body[0] else {
        panic!("expected outer block");
    };

    let types: Vec<StmtType> = block.iter().map(|stmt| stmt.get_stmt_type()).collect();
    assert_eq!(
        types,
        vec![
            StmtType::AssignmentStmt,
            StmtType::AssignmentStmt,
            StmtType::AssignmentStmt,
            StmtType::WhileStmt,
            StmtType::AssignmentStmt,
        ]
    );

    let Stmt::While(while_stmt) = &block.body[3] else {
        unreachable!()
    };
    let Stmt::Block(body) = while_stmt.body.as_ref() else {
        panic!("expected while body block");
    };
    let Stmt::If(if_stmt) = &body.body[1] else {
        panic!("expected if statement");
    };
    assert_eq!(if_stmt.else_ifs.len(), 1);
    assert!(if_stmt.else_body.is_some());
}

#[test]
fn test_tokenizing_is_idempotent() {
    let first: Vec<_> = Lexer::new(PROGRAM, Some("a.sg".to_string()))
        .collect::<Result<_, _>>()
        .unwrap();
    let second: Vec<_> = Lexer::new(PROGRAM, Some("a.sg".to_string()))
        .collect::<Result<_, _>>()
        .unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_tokens_round_trip_to_source() {
    let tokens = tokenize(PROGRAM, None).unwrap();

    let rebuilt: String = tokens.iter().map(|token| token.source_text()).collect();
    let original: String = PROGRAM.split_whitespace().collect();

    // String literals here contain no whitespace, so stripping it from the
    // source loses nothing but separators.
    assert_eq!(rebuilt, original);
}

#[test]
fn test_token_positions_point_into_source() {
    let lines: Vec<&str> = PROGRAM.split('\n').collect();

    for token in tokenize(PROGRAM, None).unwrap() {
        let start = &token.span.start;
        let line = lines[(start.line - 1) as usize];
        let text: String = line
            .chars()
            .skip((start.column - 1) as usize)
            .take(token.source_text().chars().count())
            .collect();

        assert_eq!(text, token.source_text());
    }
}

#[test]
fn test_parser_pulls_tokens_lazily() {
    // The malformed tail is never reached by a single-statement parse.
    let mut parser = Parser::new(Lexer::new("$a = 1; $b = ^", None));

    let stmt = parser.parse_statement().unwrap();
    assert_eq!(stmt.get_stmt_type(), StmtType::AssignmentStmt);

    assert!(parser.parse_statement().unwrap_err().is_lex_error());
}

#[test]
fn test_expression_entry_point() {
    let mut parser = Parser::new(Lexer::new("$a + $b * $c", None));
    let expr = parser.parse_expression().unwrap();

    let Expr::Binary(binary) = expr else {
        panic!("expected binary expression");
    };
    assert_eq!(binary.operator.kind, TokenKind::Plus);
    assert!(!parser.has_tokens().unwrap());
}

#[test]
fn test_rendered_diagnostic() {
    let source = "{\n  $a = 1\n}";
    let error = parse(source, Some("diag.sg".to_string())).unwrap_err();

    assert!(error.is_parse_error());
    assert_eq!(error.get_position().line, 3);

    let rendered = display_error(&error, source);
    assert!(rendered.starts_with("Error: UnexpectedToken (Expected Semicolon, received CloseCurly `}`)"));
    assert!(rendered.contains("-> diag.sg"));
    assert!(rendered.contains("3 | }"));
}

#[test]
fn test_lex_error_reports_offending_text() {
    let error = parse("$a = 1;\n$b = \"open", Some("lex.sg".to_string())).unwrap_err();

    assert!(error.is_lex_error());
    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
    assert_eq!(error.get_position().line, 2);
}
