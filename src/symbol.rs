//! # The symbol table
//!
//! First-order terms are built over a single flat namespace of identifiers:
//! every variable and every constant (including Skolem constants minted
//! during CNF conversion, and the "canonical" variables used to normalize
//! clauses) is a `u64` drawn from one monotone counter. Identifier `0` is
//! reserved, by convention, for the equality relation, `=`.
//!
//! The symbol table records, for each identifier, whether it names a
//! variable or a constant, together with an optional display name used only
//! for rendering. Display names are advisory: two identifiers are equal iff
//! their numbers are equal, regardless of name.
//!
//! Unlike a process-wide registry, the table here is owned by an [`Engine`]
//! (see [`crate::engine`]) and threaded explicitly through every operation
//! that needs it, so that multiple independent proof attempts can run
//! side-by-side without sharing mutable global state.

use std::collections::HashMap;

/// An identifier naming a variable or a constant. Variables and constants
/// share one namespace; [`SymbolTable::is_variable`] and
/// [`SymbolTable::is_constant`] disambiguate a given identifier.
pub type Ident = u64;

/// The identifier reserved for the equality relation, `=`.
pub const EQUALITY: Ident = 0;

/// Whether an identifier names a variable or a constant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
}

/// A process-local registry of identifiers, their kind, and an optional
/// display name. The allocator is a monotone counter: identifiers are never
/// reused, even after the term or clause that mentioned them is dropped.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    next: Ident,
    kinds: HashMap<Ident, SymbolKind>,
    names: HashMap<Ident, String>,
}

impl SymbolTable {
    /// Creates a fresh symbol table with only the equality relation
    /// pre-registered at identifier [`EQUALITY`].
    pub fn new() -> Self {
        let mut kinds = HashMap::new();
        let mut names = HashMap::new();

        kinds.insert(EQUALITY, SymbolKind::Constant);
        names.insert(EQUALITY, "=".to_string());

        Self {
            next: EQUALITY + 1,
            kinds,
            names,
        }
    }

    fn allocate(&mut self, kind: SymbolKind, name: Option<String>) -> Ident {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("symbol table identifiers exhausted");

        self.kinds.insert(id, kind);

        if let Some(name) = name {
            self.names.insert(id, name);
        }

        log::trace!("allocated fresh identifier {} ({:?})", id, kind);

        id
    }

    /// Allocates a fresh variable identifier, optionally recording a display
    /// name for it.
    pub fn fresh_variable(&mut self, name: Option<String>) -> Ident {
        self.allocate(SymbolKind::Variable, name)
    }

    /// Allocates a fresh constant identifier, optionally recording a display
    /// name for it.
    pub fn fresh_constant(&mut self, name: Option<String>) -> Ident {
        self.allocate(SymbolKind::Constant, name)
    }

    /// Returns `true` iff `id` was allocated as a variable.
    #[inline]
    pub fn is_variable(&self, id: Ident) -> bool {
        matches!(self.kinds.get(&id), Some(SymbolKind::Variable))
    }

    /// Returns `true` iff `id` was allocated as a constant.
    #[inline]
    pub fn is_constant(&self, id: Ident) -> bool {
        matches!(self.kinds.get(&id), Some(SymbolKind::Constant))
    }

    /// Returns `true` iff `id` has been registered at all.
    #[inline]
    pub fn is_registered(&self, id: Ident) -> bool {
        self.kinds.contains_key(&id)
    }

    /// Returns the advisory display name for `id`, if one was recorded.
    pub fn display_name(&self, id: Ident) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Returns a display name for `id`, falling back to a generated name
    /// (`v_{id}` for variables, `c_{id}` for constants) when none was
    /// recorded.
    pub fn display_name_or_generated(&self, id: Ident) -> String {
        if let Some(name) = self.display_name(id) {
            return name.to_string();
        }

        match self.kinds.get(&id) {
            Some(SymbolKind::Variable) => format!("v_{{{}}}", id),
            Some(SymbolKind::Constant) => format!("c_{{{}}}", id),
            None => format!("?_{{{}}}", id),
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
