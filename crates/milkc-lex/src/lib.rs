//! milkc-lex - Lexical analysis for the preset expression dialect.
//!
//! MilkDrop presets embed small expression programs (`per_frame_*`,
//! `per_pixel_*`) written in a C-like floating-point dialect. This crate
//! turns a block of that source into a token stream:
//!
//! ```text
//! "zoom = zoom + 0.1*sin(time);"
//!
//! [Ident("zoom")] [Eq] [Ident("zoom")] [Plus] [Number(0.1)] [Star]
//! [Ident("sin")] [LParen] [Ident("time")] [RParen] [Semicolon] [Eof]
//! ```
//!
//! The dialect has no keywords and no string literals: every token is a
//! number, an identifier, or punctuation. Numbers are decimal floats with
//! an optional exponent; integer-looking literals still lex as `f64` (the
//! language has a single scalar type).
//!
//! Before lexing, preset code goes through [`normalize`], which strips
//! `//` comments, re-joins argument lists that presets split across lines
//! after a `,`, and guarantees every statement ends with `;`.
//!
//! Lexical errors (unexpected characters, malformed exponents) are
//! reported to the shared [`Handler`](milkc_util::Handler) and surface as
//! [`Token::Invalid`]; the parser skips the statement and carries on.

pub mod cursor;
pub mod lexer;
pub mod normalize;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use normalize::normalize;
pub use token::Token;
