//! Contains the definition of [`ScopeStack`], the symbol table proper.

use std::num::NonZeroUsize;

use derive_new::new;
use getset::CopyGetters;
use log::{debug, trace, warn};
use symtab_arena::{Arena, ID};

use crate::{
    map::{DuplicateNameError, Position},
    record::SymbolRecord,
    scope::Scope,
};

/// Where an outward lookup found a name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters, new,
)]
pub struct Location {
    /// The scope that declares the name.
    #[get_copy = "pub"]
    scope: ID<Scope>,

    /// The position of the record within that scope's table.
    #[get_copy = "pub"]
    position: Position,
}

/// A stack of nested [`Scope`]s.
///
/// The root scope is created together with the stack and is never popped, so
/// there is always a current scope. Declarations go to the current scope;
/// lookups start there and walk outward through the parents.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Arena<Scope>,
    root: ID<Scope>,
    nested: Vec<ID<Scope>>,
    bucket_count: NonZeroUsize,
}

impl ScopeStack {
    /// Creates a stack holding only the root scope. Every scope it ever
    /// creates has `bucket_count` buckets.
    #[must_use]
    pub fn new(bucket_count: NonZeroUsize) -> Self {
        let mut scopes = Arena::new();
        let root = scopes.insert(Scope::new(bucket_count, None));

        Self { scopes, root, nested: Vec::new(), bucket_count }
    }

    /// Returns the bucket count applied to every scope.
    #[must_use]
    pub const fn bucket_count(&self) -> NonZeroUsize { self.bucket_count }

    /// Returns the ID of the innermost scope.
    #[must_use]
    pub fn current_scope_id(&self) -> ID<Scope> {
        self.nested.last().copied().unwrap_or(self.root)
    }

    /// Returns the innermost scope.
    #[must_use]
    pub fn current_scope(&self) -> &Scope {
        &self.scopes[self.current_scope_id()]
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        let id = self.current_scope_id();
        &mut self.scopes[id]
    }

    /// Returns the live scope with the given ID.
    #[must_use]
    pub fn scope(&self, id: ID<Scope>) -> Option<&Scope> { self.scopes.get(id) }

    /// Returns the number of live scopes, root included.
    #[must_use]
    pub fn scope_count(&self) -> usize { self.nested.len() + 1 }

    /// Returns the live scopes from the innermost outward.
    pub fn scopes(&self) -> impl Iterator<Item = (ID<Scope>, &Scope)> + '_ {
        self.nested
            .iter()
            .rev()
            .copied()
            .chain(std::iter::once(self.root))
            .map(|id| (id, &self.scopes[id]))
    }

    /// Returns the current scope followed by each of its ancestors.
    fn enclosing(&self) -> impl Iterator<Item = (ID<Scope>, &Scope)> + '_ {
        std::iter::successors(Some(self.current_scope_id()), |id| {
            self.scopes[*id].parent()
        })
        .map(|id| (id, &self.scopes[id]))
    }

    /// Opens a new scope nested in the current one and makes it current.
    pub fn enter_scope(&mut self) -> ID<Scope> {
        let parent = self.current_scope_id();
        let scope =
            Scope::new(self.bucket_count, Some((parent, &self.scopes[parent])));
        let id = self.scopes.insert(scope);

        self.nested.push(id);
        debug!("entered scope {}", self.scopes[id].id());

        id
    }

    /// Closes the current scope, dropping everything declared in it, and
    /// makes its parent current again. The parent's closed-child counter is
    /// incremented so the next sibling gets the next identifier suffix.
    ///
    /// Returns the closed scope, or `None` if the current scope is the root,
    /// which is never closed.
    pub fn exit_scope(&mut self) -> Option<Scope> {
        let Some(id) = self.nested.pop() else {
            warn!("attempted to exit the root scope");
            return None;
        };

        let scope = self.scopes.remove(id)?;

        if let Some(parent) =
            scope.parent().and_then(|x| self.scopes.get_mut(x))
        {
            parent.set_closed_child_count(parent.closed_child_count() + 1);
        }

        debug!("exited scope {}", scope.id());

        Some(scope)
    }

    /// Declares `record` in the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateNameError`] if the current scope already declares
    /// a symbol with the same name. Enclosing scopes are not consulted.
    pub fn insert_record(
        &mut self,
        record: SymbolRecord,
    ) -> Result<Position, DuplicateNameError> {
        trace!("declaring {record} in scope {}", self.current_scope().id());
        self.current_scope_mut().insert(record)
    }

    /// Declares `name` with a token type in the current scope.
    ///
    /// # Errors
    ///
    /// See [`Self::insert_record`].
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        token_type: impl Into<String>,
    ) -> Result<Position, DuplicateNameError> {
        self.insert_record(SymbolRecord::new(name, token_type))
    }

    /// Declares `name` with a token type and a semantic type in the current
    /// scope.
    ///
    /// # Errors
    ///
    /// See [`Self::insert_record`].
    pub fn insert_with_semantic_type(
        &mut self,
        name: impl Into<String>,
        token_type: impl Into<String>,
        semantic_type: impl Into<String>,
    ) -> Result<Position, DuplicateNameError> {
        self.insert_record(SymbolRecord::with_semantic_type(
            name,
            token_type,
            semantic_type,
        ))
    }

    /// Declares `name` with a token type, a semantic type and auxiliary data
    /// in the current scope.
    ///
    /// # Errors
    ///
    /// See [`Self::insert_record`].
    pub fn insert_with_data(
        &mut self,
        name: impl Into<String>,
        token_type: impl Into<String>,
        semantic_type: impl Into<String>,
        data: Vec<String>,
    ) -> Result<Position, DuplicateNameError> {
        self.insert_record(SymbolRecord::with_data(
            name,
            token_type,
            semantic_type,
            data,
        ))
    }

    /// Declares a deep copy of `record` in the current scope.
    ///
    /// # Errors
    ///
    /// See [`Self::insert_record`].
    pub fn insert_copy(
        &mut self,
        record: &SymbolRecord,
    ) -> Result<Position, DuplicateNameError> {
        trace!(
            "declaring a copy of {record} in scope {}",
            self.current_scope().id()
        );
        self.current_scope_mut().insert_copy(record)
    }

    /// Removes `name` from the current scope. Enclosing scopes are never
    /// touched.
    pub fn remove(&mut self, name: &str) -> Option<(SymbolRecord, Position)> {
        let removed = self.current_scope_mut().remove(name);

        if removed.is_some() {
            trace!("removed `{name}` from scope {}", self.current_scope().id());
        }

        removed
    }

    /// Resolves `name` starting at the current scope and walking outward.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SymbolRecord> {
        self.enclosing().find_map(|(_, scope)| scope.lookup(name))
    }

    /// Resolves `name` like [`Self::lookup`], mutably.
    #[must_use]
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolRecord> {
        let location = self.locate(name)?;

        self.scopes.get_mut(location.scope)?.lookup_mut(name)
    }

    /// Resolves `name` like [`Self::lookup`] and reports which scope declares
    /// it and where.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<Location> {
        self.enclosing().find_map(|(id, scope)| {
            scope.locate(name).map(|position| Location::new(id, position))
        })
    }

    /// Returns the number of records declared in the current scope alone.
    #[must_use]
    pub fn current_scope_size(&self) -> usize { self.current_scope().len() }
}

impl std::fmt::Display for ScopeStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "==========================Symbol Table=================================="
        )?;

        for (_, scope) in self.scopes() {
            write!(f, "{scope}")?;
        }

        writeln!(
            f,
            "==========================------X------================================="
        )
    }
}
