//! Edge case tests for milkc-lex

use crate::{normalize, Lexer, Token};
use milkc_util::{Handler, Symbol};

fn lex_all(source: &str) -> Vec<Token> {
    let handler = Handler::new();
    Lexer::new(source, &handler).collect()
}

// ==================== LEXER EDGE CASES ====================

#[test]
fn test_edge_empty_source() {
    assert!(lex_all("").is_empty());
}

#[test]
fn test_edge_whitespace_only() {
    assert!(lex_all("  \t\n  \r\n").is_empty());
}

#[test]
fn test_edge_comment_only() {
    assert!(lex_all("// nothing here").is_empty());
}

#[test]
fn test_edge_single_char_ident() {
    let tokens = lex_all("x");
    assert_eq!(tokens[0], Token::Ident(Symbol::intern("x")));
}

#[test]
fn test_edge_long_identifier() {
    let name = "a".repeat(4096);
    let tokens = lex_all(&name);
    assert_eq!(tokens[0], Token::Ident(Symbol::intern(&name)));
}

#[test]
fn test_edge_underscore_names() {
    let tokens = lex_all("_x wave_mystery __q");
    assert_eq!(tokens.len(), 3);
    assert!(tokens
        .iter()
        .all(|t| matches!(t, Token::Ident(_))));
}

#[test]
fn test_edge_ident_with_digits() {
    assert_eq!(lex_all("q32")[0], Token::Ident(Symbol::intern("q32")));
}

#[test]
fn test_edge_digits_then_ident_split() {
    // `3x` is the number 3 followed by identifier x (no error).
    let tokens = lex_all("3x");
    assert_eq!(tokens[0], Token::Number(3.0));
    assert_eq!(tokens[1], Token::Ident(Symbol::intern("x")));
}

#[test]
fn test_edge_zero_variants() {
    assert_eq!(lex_all("0")[0], Token::Number(0.0));
    assert_eq!(lex_all("0.0")[0], Token::Number(0.0));
    assert_eq!(lex_all("0.")[0], Token::Number(0.0));
    assert_eq!(lex_all(".0")[0], Token::Number(0.0));
}

#[test]
fn test_edge_adjacent_operators() {
    // `a=-1` must lex as `a`, `=`, `-`, `1`, not `a`, `=-`.
    let tokens = lex_all("a=-1");
    assert_eq!(
        tokens,
        vec![
            Token::Ident(Symbol::intern("a")),
            Token::Eq,
            Token::Minus,
            Token::Number(1.0),
        ]
    );
}

#[test]
fn test_edge_double_negation() {
    let tokens = lex_all("--x");
    assert_eq!(tokens[0], Token::Minus);
    assert_eq!(tokens[1], Token::Minus);
}

#[test]
fn test_edge_invalid_char_recovery() {
    let handler = Handler::new();
    let mut lexer = Lexer::new("a # b $ c", &handler);
    let tokens: Vec<Token> = std::iter::from_fn(|| {
        let t = lexer.next_token();
        (t != Token::Eof).then_some(t)
    })
    .collect();
    assert_eq!(handler.error_count(), 2);
    // Both identifiers around the junk still come through.
    let idents = tokens
        .iter()
        .filter(|t| matches!(t, Token::Ident(_)))
        .count();
    assert_eq!(idents, 3);
}

#[test]
fn test_edge_eof_is_sticky() {
    let handler = Handler::new();
    let mut lexer = Lexer::new(";", &handler);
    assert_eq!(lexer.next_token(), Token::Semicolon);
    assert_eq!(lexer.next_token(), Token::Eof);
    assert_eq!(lexer.next_token(), Token::Eof);
    assert_eq!(lexer.next_token(), Token::Eof);
}

// ==================== NORMALIZE EDGE CASES ====================

#[test]
fn test_edge_normalize_crlf_input() {
    // Windows-authored presets: the carriage return must not survive
    // into the statement text.
    assert_eq!(normalize("a = 1\r\nb = 2\r\n"), "a = 1;\nb = 2;\n");
}

#[test]
fn test_edge_normalize_trailing_comma_at_eof() {
    // A dangling continuation still gets terminated; the parser will
    // report the malformed statement later.
    assert_eq!(normalize("f(1,"), "f(1,;\n");
}

#[test]
fn test_edge_normalize_multiple_continuations() {
    let code = "v = max(a,\nb,\nc)";
    assert_eq!(normalize(code), "v = max(a, b, c);\n");
}

#[test]
fn test_edge_normalize_semicolon_only_lines() {
    assert_eq!(normalize(";\n;\n"), ";\n;\n");
}
