//! Contains the definition of [`Scope`].

use std::num::NonZeroUsize;

use getset::CopyGetters;
use symtab_arena::ID;

use crate::{
    map::{ChainedScopeMap, DuplicateNameError, Position},
    record::SymbolRecord,
};

/// One lexical scope: a [`ChainedScopeMap`] plus its place in the scope tree.
///
/// The identifier of a nested scope is its parent's identifier followed by
/// `.` and one more than the number of siblings the parent had already
/// closed when this scope was opened. The root scope is `1`, its first child
/// `1.1`; once `1.1` is closed, the next child opened under the root is `1.2`.
#[derive(Debug, Clone, CopyGetters)]
pub struct Scope {
    table: ChainedScopeMap,

    /// The nesting depth; `1` for the root scope.
    #[get_copy = "pub"]
    depth: usize,

    id: String,

    /// The number of child scopes that have been opened and closed under
    /// this scope.
    #[get_copy = "pub"]
    closed_child_count: usize,

    /// The enclosing scope, `None` for the root.
    #[get_copy = "pub"]
    parent: Option<ID<Self>>,
}

impl Scope {
    /// Creates an empty scope nested in `parent`, or a root scope if `parent`
    /// is `None`.
    ///
    /// The depth and identifier are derived from the parent's state at this
    /// moment and never change afterwards.
    #[must_use]
    pub fn new(
        bucket_count: NonZeroUsize,
        parent: Option<(ID<Self>, &Self)>,
    ) -> Self {
        let (depth, id) = match parent {
            Some((_, parent)) => (
                parent.depth + 1,
                format!("{}.{}", parent.id, parent.closed_child_count + 1),
            ),
            None => (1, "1".to_owned()),
        };

        Self {
            table: ChainedScopeMap::new(bucket_count),
            depth,
            id,
            closed_child_count: 0,
            parent: parent.map(|(id, _)| id),
        }
    }

    /// Returns the hierarchical identifier, e.g. `1.2.1`.
    #[must_use]
    pub fn id(&self) -> &str { &self.id }

    /// Overwrites the closed-child counter.
    pub fn set_closed_child_count(&mut self, closed_child_count: usize) {
        self.closed_child_count = closed_child_count;
    }

    /// Returns the table holding this scope's declarations.
    #[must_use]
    pub const fn table(&self) -> &ChainedScopeMap { &self.table }

    /// Returns the number of records declared directly in this scope.
    #[must_use]
    pub fn len(&self) -> usize { self.table.len() }

    /// Returns `true` if nothing is declared directly in this scope.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    /// Declares `record` in this scope.
    ///
    /// # Errors
    ///
    /// See [`ChainedScopeMap::insert`].
    pub fn insert(
        &mut self,
        record: SymbolRecord,
    ) -> Result<Position, DuplicateNameError> {
        self.table.insert(record)
    }

    /// Declares a deep copy of `record` in this scope.
    ///
    /// # Errors
    ///
    /// See [`ChainedScopeMap::insert`].
    pub fn insert_copy(
        &mut self,
        record: &SymbolRecord,
    ) -> Result<Position, DuplicateNameError> {
        self.table.insert_copy(record)
    }

    /// Looks `name` up in this scope only.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SymbolRecord> {
        self.table.lookup(name)
    }

    /// Looks `name` up in this scope only, mutably.
    #[must_use]
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolRecord> {
        self.table.lookup_mut(name)
    }

    /// Returns where `name` sits in this scope's table.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<Position> {
        self.table.locate(name)
    }

    /// Removes `name` from this scope.
    pub fn remove(&mut self, name: &str) -> Option<(SymbolRecord, Position)> {
        self.table.remove(name)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "\tScopetable # {}", self.id)?;
        write!(f, "{}", self.table)
    }
}
