//! Main lexer for the preset expression dialect.
//!
//! The lexer transforms expression source into a stream of tokens using
//! direct-coded dispatch on the first character. It maintains a cursor
//! for position tracking and reports lexical errors to a shared handler,
//! returning [`Token::Invalid`] so the parser can recover per statement.

use milkc_util::{Handler, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::Token;

/// The expression lexer.
///
/// # Example
///
/// ```
/// use milkc_lex::{Lexer, Token};
/// use milkc_util::{Handler, Symbol};
///
/// let handler = Handler::new();
/// let mut lexer = Lexer::new("zoom = 1.02;", &handler);
///
/// assert_eq!(lexer.next_token(), Token::Ident(Symbol::intern("zoom")));
/// assert_eq!(lexer.next_token(), Token::Eq);
/// assert_eq!(lexer.next_token(), Token::Number(1.02));
/// assert_eq!(lexer.next_token(), Token::Semicolon);
/// assert_eq!(lexer.next_token(), Token::Eof);
/// ```
pub struct Lexer<'a> {
    /// Character cursor over the source block.
    cursor: Cursor<'a>,

    /// Diagnostic sink for lexical errors.
    handler: &'a Handler,

    /// Start byte position of the current token.
    token_start: usize,

    /// Start line of the current token.
    token_start_line: u32,

    /// Start column of the current token.
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`, reporting errors to `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Skips whitespace and `//` comments, then dispatches on the first
    /// character. Returns [`Token::Eof`] at end of input (and forever
    /// after).
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                Token::LParen
            }
            ')' => {
                self.cursor.advance();
                Token::RParen
            }
            ',' => {
                self.cursor.advance();
                Token::Comma
            }
            ';' => {
                self.cursor.advance();
                Token::Semicolon
            }
            '+' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::PlusEq
                } else {
                    Token::Plus
                }
            }
            '-' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::MinusEq
                } else {
                    Token::Minus
                }
            }
            '*' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::StarEq
                } else {
                    Token::Star
                }
            }
            '/' => {
                // A comment would have been skipped above, so this is
                // division or divide-assign.
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::SlashEq
                } else {
                    Token::Slash
                }
            }
            '%' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::PercentEq
                } else {
                    Token::Percent
                }
            }
            '^' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::CaretEq
                } else {
                    Token::Caret
                }
            }
            '&' => {
                self.cursor.advance();
                if self.cursor.match_char('&') {
                    Token::AndAnd
                } else if self.cursor.match_char('=') {
                    Token::AmpEq
                } else {
                    Token::Ampersand
                }
            }
            '|' => {
                self.cursor.advance();
                if self.cursor.match_char('|') {
                    Token::OrOr
                } else if self.cursor.match_char('=') {
                    Token::PipeEq
                } else {
                    Token::Pipe
                }
            }
            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::EqEq
                } else {
                    Token::Eq
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::NotEq
                } else {
                    Token::Bang
                }
            }
            '<' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::LtEq
                } else {
                    Token::Lt
                }
            }
            '>' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::GtEq
                } else {
                    Token::Gt
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            // Leading-dot float like `.98`.
            '.' if self.cursor.char_at(1).is_ascii_digit() => self.lex_number(),
            c => {
                self.handler.error(
                    format!("unexpected character '{}'", c),
                    self.token_span_from(self.cursor.position() + c.len_utf8()),
                );
                self.cursor.advance();
                Token::Invalid(c.to_string())
            }
        }
    }

    /// Span of the most recently returned token.
    pub fn token_span(&self) -> Span {
        self.token_span_from(self.cursor.position())
    }

    fn token_span_from(&self, end: usize) -> Span {
        Span::new(
            self.token_start,
            end,
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Lex an identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    ///
    /// The dialect has no keywords; every name is an identifier. Names
    /// are case-insensitive in MilkDrop, so they are lowercased before
    /// interning - `ZOOM` and `zoom` are the same variable.
    fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        loop {
            let c = self.cursor.current_char();
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            self.cursor.advance();
        }
        let text = self.cursor.slice(start, self.cursor.position());
        if text.bytes().any(|b| b.is_ascii_uppercase()) {
            Token::Ident(Symbol::intern(&text.to_ascii_lowercase()))
        } else {
            Token::Ident(Symbol::intern(text))
        }
    }

    /// Lex a numeric literal.
    ///
    /// Format: `digits [ '.' digits ] [ ('e'|'E') ['+'|'-'] digits ]`,
    /// with the leading digits optional when the literal starts with `.`.
    fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let after_sign = if matches!(self.cursor.char_at(1), '+' | '-') {
                2
            } else {
                1
            };
            // Only consume the exponent if digits actually follow;
            // otherwise `2e` would swallow a following identifier char.
            if self.cursor.char_at(after_sign).is_ascii_digit() {
                for _ in 0..=after_sign {
                    self.cursor.advance();
                }
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        let text = self.cursor.slice(start, self.cursor.position());
        match text.parse::<f64>() {
            Ok(value) => Token::Number(value),
            Err(_) => {
                self.handler.error(
                    format!("malformed number literal '{}'", text),
                    self.token_span_from(self.cursor.position()),
                );
                Token::Invalid(text.to_string())
            }
        }
    }

    /// Skip whitespace and `//` line comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let c = self.cursor.current_char();
            if c.is_whitespace() {
                self.cursor.advance();
            } else if c == '/' && self.cursor.char_at(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
            } else {
                break;
            }
        }
    }
}

/// Iterate tokens until (but not including) `Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token == Token::Eof {
            None
        } else {
            Some(token)
        }
    }
}
