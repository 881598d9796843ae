//! Symbol table for discovered variables.
//!
//! The parser calls [`SymbolTable::register`] for every identifier used
//! as a variable; the first sighting creates the entry and classifies it.
//! Entries keep their insertion order (an `IndexMap`), which fixes the
//! order of local declarations in the generated shader and makes output
//! byte-for-byte reproducible.

use indexmap::IndexMap;
use milkc_util::{Span, Symbol};

use crate::tables;

/// Stable handle to a [`VariableEntry`].
///
/// AST variable nodes hold a `VarId` rather than a name so that a
/// variable's classification is resolved exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VarId(u32);

impl VarId {
    /// Raw table index.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// How a variable is bound in the generated shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    /// Fixed GLSL mapping; reads expand to the mapped expression.
    BuiltinReadOnly,
    /// Writable control; declared `float name = u_name;` so preset code
    /// can reassign without touching uniform storage.
    Control,
    /// One of `q1..q32` / `t1..t8`; pre-declared `float name = 0.0;`.
    StateRegister,
    /// Preset-defined scratch variable; declared `float name = 0.0;`.
    UserLocal,
}

/// A discovered variable.
#[derive(Clone, Debug)]
pub struct VariableEntry {
    /// The variable's (lowercased) name.
    pub name: Symbol,
    /// Classification, fixed at first sighting.
    pub kind: VarKind,
    /// Where the variable first appeared.
    pub first_seen: Span,
}

/// Registry of every variable the parser has seen, in discovery order.
///
/// # Examples
///
/// ```
/// use milkc_sem::{SymbolTable, VarKind};
/// use milkc_util::{Span, Symbol};
///
/// let mut symbols = SymbolTable::new();
/// let id = symbols.register(Symbol::intern("myvar"), Span::DUMMY);
/// assert_eq!(symbols.entry(id).kind, VarKind::UserLocal);
///
/// // Re-registering the same name returns the same id.
/// assert_eq!(symbols.register(Symbol::intern("myvar"), Span::DUMMY), id);
/// ```
#[derive(Default)]
pub struct SymbolTable {
    entries: IndexMap<Symbol, VariableEntry>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register a variable use, returning its stable id.
    ///
    /// The first sighting classifies the name against the built-in,
    /// control, and state-register tables; later sightings are lookups.
    pub fn register(&mut self, name: Symbol, span: Span) -> VarId {
        if let Some(index) = self.entries.get_index_of(&name) {
            return VarId(index as u32);
        }
        let kind = classify(name.as_str());
        let index = self.entries.len();
        self.entries.insert(
            name,
            VariableEntry {
                name,
                kind,
                first_seen: span,
            },
        );
        VarId(index as u32)
    }

    /// Entry for a previously returned id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this table.
    pub fn entry(&self, id: VarId) -> &VariableEntry {
        self.entries
            .get_index(id.index())
            .map(|(_, entry)| entry)
            .expect("VarId out of range for this symbol table")
    }

    /// Look up a name without registering it.
    pub fn lookup(&self, name: Symbol) -> Option<VarId> {
        self.entries.get_index_of(&name).map(|i| VarId(i as u32))
    }

    /// All entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableEntry> {
        self.entries.values()
    }

    /// User-local variables in discovery order.
    pub fn user_locals(&self) -> impl Iterator<Item = &VariableEntry> {
        self.iter().filter(|e| e.kind == VarKind::UserLocal)
    }

    /// Number of distinct variables discovered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no variables have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn classify(name: &str) -> VarKind {
    if tables::builtin_glsl(name).is_some() {
        VarKind::BuiltinReadOnly
    } else if tables::control(name).is_some() {
        VarKind::Control
    } else if tables::is_state_register(name) {
        VarKind::StateRegister
    } else {
        VarKind::UserLocal
    }
}
