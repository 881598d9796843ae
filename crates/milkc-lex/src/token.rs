//! Token definitions for the expression dialect.

use std::fmt;

use milkc_util::Symbol;

/// A lexical unit of preset expression code.
///
/// The dialect is small: numeric literals, identifiers, arithmetic and
/// comparison operators, assignment forms, and call punctuation. There
/// are no keywords - `if` is an ordinary function name.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    /// Numeric literal. Always a float; the dialect has no integer type.
    ///
    /// Examples: `1`, `0.5`, `.98`, `2e-3`
    Number(f64),

    /// Identifier: variable or function name.
    ///
    /// Pattern: `[A-Za-z_][A-Za-z0-9_]*`
    Ident(Symbol),

    // =========================================================================
    // ARITHMETIC OPERATORS
    // =========================================================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^` - power operator (binds tighter than `*`)
    Caret,

    // =========================================================================
    // BITWISE AND LOGICAL OPERATORS
    // =========================================================================
    /// `&` - bitwise and (operands truncated to int)
    Ampersand,
    /// `|` - bitwise or
    Pipe,
    /// `&&` - logical and
    AndAnd,
    /// `||` - logical or
    OrOr,
    /// `!` - logical not
    Bang,

    // =========================================================================
    // COMPARISON OPERATORS
    // =========================================================================
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,

    // =========================================================================
    // ASSIGNMENT OPERATORS
    // =========================================================================
    /// `=`
    Eq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `&=`
    AmpEq,
    /// `|=`
    PipeEq,
    /// `^=`
    CaretEq,

    // =========================================================================
    // PUNCTUATORS
    // =========================================================================
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;` - statement separator
    Semicolon,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// End of input.
    Eof,

    /// Unrecognized input, kept for error recovery. Contains the bad text.
    Invalid(String),
}

impl Token {
    /// Returns true for any of the assignment tokens (`=`, `+=`, ...).
    pub fn is_assign_op(&self) -> bool {
        matches!(
            self,
            Token::Eq
                | Token::PlusEq
                | Token::MinusEq
                | Token::StarEq
                | Token::SlashEq
                | Token::PercentEq
                | Token::AmpEq
                | Token::PipeEq
                | Token::CaretEq
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Ident(sym) => write!(f, "{}", sym),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Percent => f.write_str("%"),
            Token::Caret => f.write_str("^"),
            Token::Ampersand => f.write_str("&"),
            Token::Pipe => f.write_str("|"),
            Token::AndAnd => f.write_str("&&"),
            Token::OrOr => f.write_str("||"),
            Token::Bang => f.write_str("!"),
            Token::EqEq => f.write_str("=="),
            Token::NotEq => f.write_str("!="),
            Token::Lt => f.write_str("<"),
            Token::LtEq => f.write_str("<="),
            Token::Gt => f.write_str(">"),
            Token::GtEq => f.write_str(">="),
            Token::Eq => f.write_str("="),
            Token::PlusEq => f.write_str("+="),
            Token::MinusEq => f.write_str("-="),
            Token::StarEq => f.write_str("*="),
            Token::SlashEq => f.write_str("/="),
            Token::PercentEq => f.write_str("%="),
            Token::AmpEq => f.write_str("&="),
            Token::PipeEq => f.write_str("|="),
            Token::CaretEq => f.write_str("^="),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Semicolon => f.write_str(";"),
            Token::Eof => f.write_str("<eof>"),
            Token::Invalid(text) => write!(f, "{}", text),
        }
    }
}
