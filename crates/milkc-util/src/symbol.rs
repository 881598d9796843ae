//! Interned identifier strings.
//!
//! Identifiers show up many times during a compile (every `zoom`, every
//! `q1`), so the lexer interns them once and hands around a small copyable
//! [`Symbol`] instead of allocating `String`s. Interned strings live for
//! the duration of the process; a preset compile touches a few dozen
//! distinct names, so the table stays tiny.

use std::fmt;
use std::sync::{Mutex, OnceLock};

use rustc_hash::FxHashMap;

/// An interned string.
///
/// Two `Symbol`s are equal iff their strings are equal, so comparison is
/// a single integer compare.
///
/// # Examples
///
/// ```
/// use milkc_util::Symbol;
///
/// let a = Symbol::intern("zoom");
/// let b = Symbol::intern("zoom");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "zoom");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

struct Interner {
    names: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        Self {
            names: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, string: &str) -> u32 {
        if let Some(&index) = self.names.get(string) {
            return index;
        }
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = self.strings.len() as u32;
        self.strings.push(leaked);
        self.names.insert(leaked, index);
        index
    }
}

static INTERNER: OnceLock<Mutex<Interner>> = OnceLock::new();

fn interner() -> &'static Mutex<Interner> {
    INTERNER.get_or_init(|| Mutex::new(Interner::new()))
}

impl Symbol {
    /// Intern a string, returning its symbol.
    pub fn intern(string: &str) -> Self {
        let mut table = interner().lock().unwrap_or_else(|e| e.into_inner());
        Symbol(table.intern(string))
    }

    /// Returns the interned string.
    pub fn as_str(&self) -> &'static str {
        let table = interner().lock().unwrap_or_else(|e| e.into_inner());
        table.strings[self.0 as usize]
    }

    /// Raw table index, stable for the life of the process.
    #[inline]
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}
