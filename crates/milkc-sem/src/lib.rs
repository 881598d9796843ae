//! milkc-sem - Variable discovery and static lookup tables.
//!
//! The expression dialect never declares variables: the first assignment
//! (or read) of a name brings it into existence. During parsing, every
//! identifier is registered in a [`SymbolTable`] and classified:
//!
//! - **Built-in read-only** - fixed meanings with GLSL equivalents
//!   (`time` → `iTime`, `bass` → `iAudioBands.x`, ...).
//! - **Control** - writable preset parameters exposed as `u_`-prefixed
//!   uniforms with slider metadata (`zoom`, `rot`, `decay`, ...).
//! - **State register** - the pre-declared scalars `q1..q32` / `t1..t8`
//!   MilkDrop uses to pass values between blocks.
//! - **User local** - anything else; declared `float name = 0.0;` at
//!   shader entry.
//!
//! Classification is table-driven; the tables in [`tables`] are the
//! single source of truth and also drive uniform emission, so their
//! ordering is part of the deterministic-output guarantee.

pub mod symbol_table;
pub mod tables;

pub use symbol_table::{SymbolTable, VarId, VarKind, VariableEntry};
pub use tables::{builtin_glsl, control, function_arity, is_state_register, ControlDescriptor};
