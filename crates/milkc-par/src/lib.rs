//! milkc-par - Parser for the preset expression dialect.
//!
//! The grammar is a flat expression language: a block is a `;`-separated
//! list of expressions, and assignment is itself an expression. There are
//! no declarations, no blocks, no control flow - `if` is a three-argument
//! function. A Pratt parser (see [`expr`]) handles precedence.
//!
//! # Error recovery
//!
//! Preset files in the wild contain broken lines, and MilkDrop players
//! shrug them off. The parser does the same: when a statement fails, a
//! [`ParseError`] is reported through the shared handler, tokens are
//! skipped up to the next `;`, and parsing continues with the following
//! statement. A block whose statements all fail parses to an empty
//! `Sequence` - the caller still gets a usable (if inert) program.
//!
//! # Variable discovery
//!
//! Every identifier used as a variable is registered in the
//! [`SymbolTable`] when first seen, so by the time a block has parsed,
//! the table knows every control, state register, and user local the
//! code touches. Identifiers followed by `(` are function calls instead;
//! unknown function names and wrong argument counts fail the statement.

pub mod ast;
pub mod expr;

#[cfg(test)]
mod edge_cases;

pub use ast::{AssignExpr, AssignOp, BinOp, BinaryExpr, CallExpr, Node, UnOp, UnaryExpr};

use milkc_lex::{Lexer, Token};
use milkc_sem::SymbolTable;
use milkc_util::{Handler, Span};
use thiserror::Error;

/// A token paired with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenWithSpan {
    pub token: Token,
    pub span: Span,
}

impl TokenWithSpan {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

/// A failed statement.
///
/// Parse errors are per statement and never abort the block; they are
/// also mirrored into the diagnostic handler for the driver to print.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// Line of the offending token (1-based).
    pub line: u32,
    /// Column of the offending token (1-based).
    pub column: u32,
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    fn at(span: Span, message: impl Into<String>) -> Self {
        Self {
            line: span.line,
            column: span.column,
            message: message.into(),
        }
    }
}

/// The expression parser.
///
/// # Example
///
/// ```
/// use milkc_par::{Node, Parser};
/// use milkc_sem::SymbolTable;
/// use milkc_util::Handler;
///
/// let handler = Handler::new();
/// let mut symbols = SymbolTable::new();
/// let program = Parser::from_source("zoom = 1.2;", &mut symbols, &handler).parse();
///
/// assert!(matches!(program, Node::Sequence(ref stmts) if stmts.len() == 1));
/// assert!(!handler.has_errors());
/// ```
pub struct Parser<'a> {
    /// Token stream, terminated by `Token::Eof`.
    tokens: Vec<TokenWithSpan>,

    /// Current position in the token stream.
    position: usize,

    /// Variable registry, shared across the per-frame and per-pixel
    /// blocks of one compile.
    symbols: &'a mut SymbolTable,

    /// Diagnostic sink.
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Create a parser over a pre-lexed token stream.
    ///
    /// The stream is terminated with `Token::Eof` if it is not already.
    pub fn new(
        mut tokens: Vec<TokenWithSpan>,
        symbols: &'a mut SymbolTable,
        handler: &'a Handler,
    ) -> Self {
        if !matches!(tokens.last(), Some(t) if t.token == Token::Eof) {
            tokens.push(TokenWithSpan::new(Token::Eof, Span::DUMMY));
        }
        Self {
            tokens,
            position: 0,
            symbols,
            handler,
        }
    }

    /// Lex `source` and create a parser over the result.
    pub fn from_source(source: &str, symbols: &'a mut SymbolTable, handler: &'a Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let span = lexer.token_span();
            let done = token == Token::Eof;
            tokens.push(TokenWithSpan::new(token, span));
            if done {
                break;
            }
        }
        Self::new(tokens, symbols, handler)
    }

    /// Parse the whole block into a `Sequence`.
    ///
    /// Failed statements are skipped (see module docs); the returned
    /// sequence contains only the statements that parsed.
    pub fn parse(&mut self) -> Node {
        let mut stmts = Vec::new();
        loop {
            while self.check(&Token::Semicolon) {
                self.advance();
            }
            if self.at_eof() {
                break;
            }
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => {
                    self.report(&error);
                    self.recover_to_semicolon();
                }
            }
        }
        Node::Sequence(stmts)
    }

    /// Parse one statement: an expression that must be followed by `;`
    /// or end of input.
    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expr()?;
        if !self.at_eof() && !self.check(&Token::Semicolon) {
            return Err(ParseError::at(
                self.current_span(),
                format!("expected ';', found '{}'", self.current_token()),
            ));
        }
        Ok(node)
    }

    /// Mirror a parse error into the diagnostic handler.
    fn report(&self, error: &ParseError) {
        self.handler.error(
            error.message.clone(),
            Span::point(0, error.line, error.column),
        );
    }

    /// Skip tokens until the next `;` (not consumed) or end of input.
    fn recover_to_semicolon(&mut self) {
        while !self.at_eof() && !self.check(&Token::Semicolon) {
            self.advance();
        }
    }

    // =========================================================================
    // TOKEN STREAM HELPERS
    // =========================================================================

    fn current(&self) -> &TokenWithSpan {
        // The stream always ends with an Eof token; clamp so repeated
        // advances past the end keep yielding it.
        let index = self.position.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn current_token(&self) -> &Token {
        &self.current().token
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        self.current_token() == token
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    pub(crate) fn expect(&mut self, token: Token) -> Result<(), ParseError> {
        if self.check(&token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::at(
                self.current_span(),
                format!("expected '{}', found '{}'", token, self.current_token()),
            ))
        }
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut SymbolTable {
        self.symbols
    }
}
