//! milkc-util - Shared infrastructure for the milkc compiler
//!
//! This crate provides the pieces every phase of the pipeline needs:
//!
//! - [`Span`] - source location tracking for tokens and diagnostics
//! - [`Symbol`] - interned identifier strings with cheap equality
//! - [`Diagnostic`], [`Handler`], [`Level`] - error/warning collection
//!
//! The compiler is a one-shot batch translator (preset text in, shader
//! text out), so everything here is deliberately simple: no source maps,
//! no incremental caches, no concurrency. The `Handler` collects
//! diagnostics during a compile pass and the driver decides what to print.

pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
pub use symbol::Symbol;
