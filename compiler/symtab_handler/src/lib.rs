//! Sinks for diagnostics produced while driving a symbol table.
//!
//! The symbol table itself never reports anything: its failures are returned
//! as values. Whoever drives it (the command-script driver, a semantic
//! analyzer) decides which of those failures become diagnostics and sends
//! them to a [`Handler`].

use std::sync::atomic::{AtomicUsize, Ordering};

use derive_more::{Deref, DerefMut};
use parking_lot::{RwLock, RwLockReadGuard};


/// Represents a trait responsible for receiving diagnostics.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Collects every diagnostic it receives, in arrival order.
#[derive(Debug, Deref, DerefMut)]
pub struct Storage<T> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: RwLock::new(Vec::new()) } }

    /// Consumes the [`Storage`] and returns the collected diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }

    /// Returns a read guard over the collected diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> { self.diagnostics.read() }

    /// Returns the number of diagnostics collected so far.
    #[must_use]
    pub fn len(&self) -> usize { self.diagnostics.read().len() }

    /// Returns `true` if nothing has been reported yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.diagnostics.read().is_empty() }

    /// Moves every collected diagnostic into `handler`, leaving this storage
    /// empty.
    pub fn propagate<U: From<T>, H: ?Sized + Handler<U>>(&self, handler: &H) {
        let diagnostics = std::mem::take(&mut *self.diagnostics.write());

        for diagnostic in diagnostics {
            handler.receive(diagnostic.into());
        }
    }
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T, U: Into<T>> Handler<U> for Storage<T> {
    fn receive(&self, diagnostic: U) {
        self.diagnostics.write().push(diagnostic.into());
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _: T) {}
}

/// Counts the diagnostics it receives and otherwise discards them.
#[derive(Debug, Default)]
pub struct Counter {
    counter: AtomicUsize,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.load(Ordering::Relaxed) }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.counter.store(0, Ordering::Relaxed); }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _: T) { self.counter.fetch_add(1, Ordering::Relaxed); }
}

/// Panics on the first diagnostic it receives, printing it with [`Debug`].
///
/// Useful where a diagnostic can only mean a bug in the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Panic;

impl<T: std::fmt::Debug> Handler<T> for Panic {
    fn receive(&self, diagnostic: T) {
        panic!("unexpected diagnostic: {diagnostic:?}");
    }
}
