//! Edge case tests for milkc-par

use crate::{Node, Parser};
use milkc_sem::SymbolTable;
use milkc_util::Handler;

fn parse_block(source: &str) -> (Node, SymbolTable, Handler) {
    let handler = Handler::new();
    let mut symbols = SymbolTable::new();
    let node = Parser::from_source(source, &mut symbols, &handler).parse();
    (node, symbols, handler)
}

fn stmt_count(node: &Node) -> usize {
    match node {
        Node::Sequence(stmts) => stmts.len(),
        _ => panic!("expected Sequence"),
    }
}

// ==================== EDGE CASES ====================

#[test]
fn test_edge_deeply_nested_parens() {
    let source = format!("a = {}1{};", "(".repeat(64), ")".repeat(64));
    let (node, _, handler) = parse_block(&source);
    assert!(!handler.has_errors());
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_long_operator_chain() {
    let source = format!("total = {};", vec!["1"; 200].join(" + "));
    let (node, _, handler) = parse_block(&source);
    assert!(!handler.has_errors());
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_bare_expression_statement() {
    // A statement need not be an assignment; the original evaluator
    // accepts (and discards) bare expressions.
    let (node, _, handler) = parse_block("sin(time);");
    assert!(!handler.has_errors());
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_bare_number_statement() {
    let (node, _, handler) = parse_block("42;");
    assert!(!handler.has_errors());
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_zero_arg_call_rejected() {
    let (node, _, handler) = parse_block("q1 = rand();");
    assert!(handler.has_errors());
    assert!(node.is_empty_sequence());
}

#[test]
fn test_edge_multiple_failures_multiple_diagnostics() {
    let (node, _, handler) = parse_block("a = ); b = (; c = 3;");
    assert_eq!(handler.error_count(), 2);
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_junk_token_inside_statement() {
    let (node, _, handler) = parse_block("a = 1 @ 2; b = 3;");
    assert!(handler.has_errors());
    // Statement with the junk token is dropped; the next one survives.
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_variables_shared_between_parses() {
    // The driver parses per-frame and per-pixel blocks into one table.
    let handler = Handler::new();
    let mut symbols = SymbolTable::new();
    Parser::from_source("shared = 1;", &mut symbols, &handler).parse();
    Parser::from_source("other = shared;", &mut symbols, &handler).parse();
    assert_eq!(symbols.len(), 2);
}

#[test]
fn test_edge_case_insensitive_variables() {
    // `Zoom` and `zoom` are the same variable (lexer lowercases).
    let (_, symbols, handler) = parse_block("Zoom = 1; zoom = 2; ZOOM = 3;");
    assert!(!handler.has_errors());
    assert_eq!(symbols.len(), 1);
}

#[test]
fn test_edge_assignment_inside_arithmetic() {
    // `a = 1 + (b = 2)` - assignment is an expression.
    let (node, _, handler) = parse_block("a = 1 + (b = 2);");
    assert!(!handler.has_errors());
    assert_eq!(stmt_count(&node), 1);
}

#[test]
fn test_edge_unknown_function_skips_only_its_statement() {
    let (node, _, handler) = parse_block("ok1 = 1; bad = nosuchfn(2); ok2 = 3;");
    assert_eq!(handler.error_count(), 1);
    assert_eq!(stmt_count(&node), 2);
}
