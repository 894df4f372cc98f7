//! Contains the definition of the [`Arena`] type.
//!
//! [`Arena`] owns every item inserted into it and hands out [`ID`]s to refer
//! to them. Structures that would otherwise need a second, non-owning pointer
//! (a link to the next node of a list, a link back to a parent) store an
//! [`ID`] instead and resolve it through the owning arena.

use std::{
    collections::HashMap,
    fmt::Debug,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

#[cfg(test)]
mod arbitrary;


/// A unique identifier for an item in the [`Arena`] of type `T`.
pub struct ID<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> ID<T> {
    /// Creates a new [`ID`] with the given index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// Returns the raw index of the [`ID`].
    #[must_use]
    pub const fn index(&self) -> usize { self.index }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID({})", self.index)
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T> Eq for ID<T> {}

impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// Represents a collection of items of type `T`.
///
/// Each new item added to the arena is assigned with a unique [`ID`]. IDs are
/// never reused, even after the item they referred to has been removed, so a
/// stale [`ID`] resolves to `None` rather than to an unrelated item.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: HashMap<ID<T>, T>,
    next_index: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self { Self { items: HashMap::new(), next_index: 0 } }
}

impl<T> Arena<T> {
    /// Creates a new, empty arena.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Adds an item to the arena and returns its ID.
    pub fn insert(&mut self, item: T) -> ID<T> {
        let new_id = ID::new(self.next_index);
        self.next_index += 1;

        assert!(self.items.insert(new_id, item).is_none());

        new_id
    }

    /// Returns the number of items in the arena.
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` if the arena contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Returns `true` if the arena holds an item with the given ID.
    #[must_use]
    pub fn contains(&self, id: ID<T>) -> bool { self.items.contains_key(&id) }

    /// Returns an iterator over the IDs of the items in the arena.
    ///
    /// The iteration order is unspecified.
    pub fn ids(&self) -> impl Iterator<Item = ID<T>> + '_ {
        self.items.keys().copied()
    }

    /// Removes an item from the arena and returns it.
    pub fn remove(&mut self, id: ID<T>) -> Option<T> { self.items.remove(&id) }

    /// Returns a reference to the item in the arena with the given ID.
    #[must_use]
    pub fn get(&self, id: ID<T>) -> Option<&T> { self.items.get(&id) }

    /// Returns a mutable reference to the item in the arena with the given ID.
    #[must_use]
    pub fn get_mut(&mut self, id: ID<T>) -> Option<&mut T> {
        self.items.get_mut(&id)
    }
}

impl<T> Index<ID<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: ID<T>) -> &Self::Output { &self.items[&id] }
}

impl<T> IndexMut<ID<T>> for Arena<T> {
    fn index_mut(&mut self, id: ID<T>) -> &mut Self::Output {
        self.items.get_mut(&id).unwrap()
    }
}
