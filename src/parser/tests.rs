//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Assignments
//! - Operator precedence and associativity
//! - Prefix negation, calls and grouping
//! - Control flow statements and blocks
//! - Error cases

use crate::{
    ast::{
        ast::{Expr, ExprType, Stmt, StmtType},
        statements::AssignmentStmt,
    },
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, Parser, MAX_NESTING_DEPTH};

fn parser(source: &str) -> Parser {
    Parser::new(Lexer::new(source, Some("test.sg".to_string())))
}

fn assignment(source: &str) -> AssignmentStmt {
    parser(source).parse_assignment_statement().unwrap()
}

fn expression(source: &str) -> Expr {
    parser(source).parse_expression().unwrap()
}

/// Renders an expression fully parenthesised, for shape assertions.
fn shape(expr: &Expr) -> String {
    match expr {
        Expr::Binary(binary) => format!(
            "({} {} {})",
            shape(&binary.left),
            binary.operator.value,
            shape(&binary.right)
        ),
        Expr::Prefix(prefix) => format!("({}{})", prefix.operator.value, shape(&prefix.right)),
        Expr::Literal(literal) => literal.token.source_text(),
        Expr::Call(call) => format!("{}()", call.callee.value),
    }
}

#[test]
fn test_parse_assignment() {
    let stmt = assignment("$x = 42;");

    assert_eq!(stmt.identifier.kind, TokenKind::IdPublicScalar);
    assert_eq!(stmt.identifier.value, "$x");
    match &stmt.value {
        Expr::Literal(literal) => {
            assert_eq!(literal.token.kind, TokenKind::IntegerLiteral);
            assert_eq!(literal.token.value, "42");
        }
        other => panic!("expected literal, got {:?}", other),
    }
}

#[test]
fn test_assignment_to_every_identifier_kind() {
    for source in ["$a = 1;", "$_a = 1;", "@a = 1;", "@_a = 1;", "%a = 1;", "%_a = 1;"] {
        assert!(parse(source, None).is_ok(), "{} should parse", source);
    }
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    let stmt = assignment("$x = 1 + 2 * 3;");

    let Expr::Binary(root) = &stmt.value else {
        panic!("expected binary expression");
    };
    assert_eq!(root.operator.kind, TokenKind::Plus);
    assert_eq!(root.left.get_expr_type(), ExprType::Literal);

    let Expr::Binary(right) = root.right.as_ref() else {
        panic!("expected binary right operand");
    };
    assert_eq!(right.operator.kind, TokenKind::Star);
}

#[test]
fn test_binary_nodes_keep_their_operator() {
    let expr = expression("$a || $b && $c + $d - $e * $f / $g % $h");

    assert_eq!(
        shape(&expr),
        "($a || ($b && (($c + $d) - ((($e * $f) / $g) % $h))))"
    );
}

#[test]
fn test_left_associativity() {
    assert_eq!(shape(&expression("1 - 2 - 3")), "((1 - 2) - 3)");
    assert_eq!(shape(&expression("1 / 2 * 3")), "((1 / 2) * 3)");
    assert_eq!(shape(&expression("$a || $b || $c")), "(($a || $b) || $c)");
}

#[test]
fn test_logical_and_binds_tighter_than_or() {
    assert_eq!(shape(&expression("$a && $b || $c && $d")), "(($a && $b) || ($c && $d))");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(shape(&expression("(1 + 2) * 3")), "((1 + 2) * 3)");
    assert_eq!(shape(&expression("((($a)))")), "$a");
}

#[test]
fn test_prefix_not() {
    let expr = expression("!!$x");

    let Expr::Prefix(outer) = &expr else {
        panic!("expected prefix expression");
    };
    assert_eq!(outer.operator.kind, TokenKind::Not);
    assert_eq!(outer.operator.span.start.column, 1);

    let Expr::Prefix(inner) = outer.right.as_ref() else {
        panic!("expected nested prefix expression");
    };
    assert_eq!(inner.operator.span.start.column, 2);
    assert_eq!(inner.right.get_expr_type(), ExprType::Literal);
}

#[test]
fn test_prefix_binds_tighter_than_binary() {
    assert_eq!(shape(&expression("!$a * $b")), "((!$a) * $b)");
    assert_eq!(shape(&expression("!($a && $b)")), "(!($a && $b))");
}

#[test]
fn test_literal_kinds() {
    assert_eq!(shape(&expression("\"s\" + 'c' + 1.5 + 0x1F")), "(((\"s\" + 'c') + 1.5) + 0x1F)");
}

#[test]
fn test_literal_wraps_consumed_token() {
    let Expr::Binary(binary) = expression("7 + 8") else {
        panic!("expected binary expression");
    };

    assert_eq!(binary.left.get_token().value, "7");
    assert_eq!(binary.left.get_token().kind, TokenKind::IntegerLiteral);
    assert_eq!(binary.right.get_token().value, "8");
}

#[test]
fn test_function_call() {
    let expr = expression("@items() + $count");

    let Expr::Binary(binary) = &expr else {
        panic!("expected binary expression");
    };
    match binary.left.as_ref() {
        Expr::Call(call) => assert_eq!(call.callee.value, "@items"),
        other => panic!("expected call, got {:?}", other),
    }
    assert_eq!(binary.right.get_expr_type(), ExprType::Literal);
}

#[test]
fn test_call_with_arguments_is_rejected() {
    let error = parser("$f($x)").parse_expression().unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().column, 4);
}

#[test]
fn test_parse_if_else_chain() {
    let mut parser =
        parser("if ($x) { $y = 1; } else if ($z) { $y = 2; } else { $y = 3; }");
    let stmt = parser.parse_if_statement().unwrap();

    assert_eq!(stmt.then_body.get_stmt_type(), StmtType::BlockStmt);
    assert_eq!(stmt.else_ifs.len(), 1);
    assert_eq!(shape(&stmt.else_ifs[0].condition), "$z");
    assert!(stmt.else_body.is_some());

    let Some(else_body) = &stmt.else_body else {
        unreachable!()
    };
    let Stmt::Block(block) = else_body.as_ref() else {
        panic!("expected block else-branch");
    };
    let Stmt::Assignment(assign) = &block.body[0] else {
        panic!("expected assignment");
    };
    assert_eq!(shape(&assign.value), "3");
}

#[test]
fn test_parse_if_without_else() {
    let stmt = parser("if ($x) $y = 1;").parse_if_statement().unwrap();

    assert!(stmt.else_ifs.is_empty());
    assert!(stmt.else_body.is_none());
    assert_eq!(stmt.then_body.get_stmt_type(), StmtType::AssignmentStmt);
}

#[test]
fn test_multiple_else_ifs_in_order() {
    let stmt = parser("if ($a) $r = 1; else if ($b) $r = 2; else if ($c) $r = 3;")
        .parse_if_statement()
        .unwrap();

    let conditions: Vec<String> = stmt.else_ifs.iter().map(|c| shape(&c.condition)).collect();
    assert_eq!(conditions, vec!["$b", "$c"]);
    assert!(stmt.else_body.is_none());
}

#[test]
fn test_bare_else_ends_the_chain() {
    // A second bare `else` has no `if` left to attach to.
    let result = parse(
        "if ($a) $r = 1; else if ($b) $r = 2; else $r = 3; else $r = 4;",
        None,
    );
    assert!(result.is_err());

    let mut parser = parser("if ($a) $r = 1; else $r = 2; $s = 3;");
    let stmt = parser.parse_if_statement().unwrap();
    assert!(stmt.else_ifs.is_empty());
    assert!(stmt.else_body.is_some());
    assert_eq!(parser.current_token_kind().unwrap(), TokenKind::IdPublicScalar);
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let stmt = parser("if ($a) if ($b) $r = 1; else $r = 2;")
        .parse_if_statement()
        .unwrap();

    assert!(stmt.else_body.is_none());
    let Stmt::If(inner) = stmt.then_body.as_ref() else {
        panic!("expected nested if");
    };
    assert!(inner.else_body.is_some());
}

#[test]
fn test_parse_while() {
    let stmt = parser("while ($i) { $i = $i - 1; }")
        .parse_while_statement()
        .unwrap();

    assert_eq!(shape(&stmt.condition), "$i");
    let Stmt::Block(block) = stmt.body.as_ref() else {
        panic!("expected block body");
    };
    assert_eq!(block.len(), 1);
}

#[test]
fn test_parse_empty_block() {
    let block = parser("{}").parse_block().unwrap();

    assert!(block.is_empty());
    assert_eq!(block.span.start.column, 1);
    assert_eq!(block.span.end.column, 3);
}

#[test]
fn test_nested_blocks_keep_order() {
    let block = parser("{ $a = 1; { $b = 2; } $c = 3; }").parse_block().unwrap();

    let types: Vec<StmtType> = block.iter().map(|stmt| stmt.get_stmt_type()).collect();
    assert_eq!(
        types,
        vec![StmtType::AssignmentStmt, StmtType::BlockStmt, StmtType::AssignmentStmt]
    );
}

#[test]
fn test_statement_spans() {
    let program = parse("$a = 1;\nwhile ($a) { $a = 0; }", None).unwrap();

    assert_eq!(program.body[0].get_span().start.column, 1);
    assert_eq!(program.body[0].get_span().end.column, 8);
    assert_eq!(program.body[1].get_span().start.line, 2);
    assert_eq!(program.body[1].get_span().end.line, 2);
}

#[test]
fn test_missing_semicolon() {
    let error = parse("$x = 1", None).unwrap_err();

    assert!(error.is_parse_error());
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.get_tip().to_string(),
        "Expected Semicolon, received EOF `EOF`"
    );
}

#[test]
fn test_unclosed_block() {
    let error = parse("{ $x = 1;", None).unwrap_err();

    assert!(error.is_parse_error());
    assert!(error.get_tip().to_string().starts_with("Expected CloseCurly"));
}

#[test]
fn test_statement_must_start_with_identifier() {
    let error = parse("42 = $x;", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert!(error.get_tip().to_string().contains("IdPublicScalar"));
}

#[test]
fn test_missing_expression() {
    let error = parse("$x = ;", None).unwrap_err();
    assert_eq!(error.get_error_name(), "ExpectedExpression");

    let error = parse("$x = 1 + ;", None).unwrap_err();
    assert_eq!(error.get_error_name(), "ExpectedExpression");
}

#[test]
fn test_if_requires_parentheses() {
    let error = parse("if $x { }", None).unwrap_err();
    assert!(error.get_tip().to_string().starts_with("Expected OpenParen"));
}

#[test]
fn test_lex_error_aborts_parse() {
    let error = parse("$x = 1;\n$y = 0x;", None).unwrap_err();

    assert!(error.is_lex_error());
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_parse_empty_program() {
    let program = parse("   \n ", None).unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_moderate_nesting_parses() {
    let source = format!("$x = {}1{};", "(".repeat(50), ")".repeat(50));
    assert!(parse(&source, None).is_ok());

    let source = format!("{}$x = 1;{}", "{".repeat(50), "}".repeat(50));
    assert!(parse(&source, None).is_ok());
}

#[test]
fn test_deep_grouping_is_an_error() {
    let source = format!("$x = {}1{};", "(".repeat(500), ")".repeat(500));
    let error = parse(&source, None).unwrap_err();

    assert!(error.is_parse_error());
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_deep_prefix_is_an_error() {
    let source = format!("$x = {}$y;", "!".repeat(3000));
    let error = parse(&source, None).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_deep_blocks_are_an_error() {
    let source = "{".repeat(MAX_NESTING_DEPTH + 1);
    let error = parse(&source, None).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_nesting_depth_recovers_after_success() {
    let depth = MAX_NESTING_DEPTH - 2;
    let source = format!(
        "$x = {}1{}; $y = {}2{};",
        "(".repeat(depth),
        ")".repeat(depth),
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let mut parser = parser(&source);

    assert!(parser.parse_statement().is_ok());
    assert!(parser.parse_statement().is_ok());
}
