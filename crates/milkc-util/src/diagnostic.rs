//! Diagnostic collection.
//!
//! Lexer and parser errors in preset code are never fatal: the offending
//! statement is skipped and compilation continues (a preset with one
//! broken line still produces a shader). Phases therefore report problems
//! to a shared [`Handler`] instead of returning `Err`, and the driver
//! prints whatever accumulated once the pipeline finishes.

use std::cell::RefCell;
use std::fmt;

use crate::span::Span;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// A problem that invalidated part of the input (e.g. a statement
    /// that failed to parse and was skipped).
    Error,
    /// Suspicious but recoverable (e.g. unknown wave mode, falling back).
    Warning,
    /// Additional context attached to a previous diagnostic.
    Note,
}

impl Level {
    /// Returns true if this level represents an error.
    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
        };
        f.write_str(text)
    }
}

/// A single diagnostic message with its source location.
///
/// # Examples
///
/// ```
/// use milkc_util::{Diagnostic, Span};
///
/// let diag = Diagnostic::error("unexpected token ')'", Span::new(4, 5, 1, 5));
/// assert_eq!(format!("{}", diag), "error: unexpected token ')' (line 1, column 5)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Severity of the diagnostic.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
    /// Where in the source block the problem was found.
    pub span: Span,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit level.
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span == Span::DUMMY {
            write!(f, "{}: {}", self.level, self.message)
        } else {
            write!(
                f,
                "{}: {} (line {}, column {})",
                self.level, self.message, self.span.line, self.span.column
            )
        }
    }
}

/// Collects diagnostics during a compile pass.
///
/// The handler is shared by reference between the lexer, the parser, and
/// the driver, so it uses interior mutability. The pipeline is strictly
/// single-threaded (spec: one `translate()` call, no shared state), which
/// makes `RefCell` sufficient.
///
/// # Examples
///
/// ```
/// use milkc_util::{Handler, Span};
///
/// let handler = Handler::new();
/// handler.error("unknown function 'frobnicate'", Span::DUMMY);
/// assert!(handler.has_errors());
/// assert_eq!(handler.error_count(), 1);
/// ```
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new, empty handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Report an error.
    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(message, span));
    }

    /// Report a warning.
    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    /// Emit a pre-built diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns true if any error-level diagnostic has been collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level.is_error())
    }

    /// Number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    /// Number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Snapshot of all collected diagnostics, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
