//! Contains the definition of [`ChainedScopeMap`], the per-scope hash table.

use std::num::NonZeroUsize;

use derive_new::new;
use getset::CopyGetters;
use symtab_arena::{Arena, ID};

use crate::record::SymbolRecord;

/// Hashes a symbol name.
///
/// Every byte is folded in as `h = byte + (h << 6) + (h << 16) - h` using
/// wrapping 64-bit unsigned arithmetic. Bytes are sign-extended before the
/// addition, so names containing non-ASCII characters hash to the same values
/// as they would with a signed `char`.
#[must_use]
pub fn hash(name: &str) -> u64 {
    name.bytes().fold(0u64, |hash, byte| {
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let byte = i64::from(byte as i8) as u64;

        byte.wrapping_add(hash << 6).wrapping_add(hash << 16).wrapping_sub(hash)
    })
}

/// Where a record sits inside a [`ChainedScopeMap`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters, new,
)]
pub struct Position {
    /// The index of the bucket whose chain holds the record.
    #[get_copy = "pub"]
    bucket: usize,

    /// The zero-based index of the record within its bucket's chain.
    #[get_copy = "pub"]
    chain_index: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.bucket, self.chain_index)
    }
}

/// A record with the same name is already present in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{name}` is already declared in this scope (at position {position})")]
pub struct DuplicateNameError {
    /// The rejected name.
    pub name: String,

    /// The position of the record that already holds the name.
    pub position: Position,
}

#[derive(Debug, Clone)]
struct Node {
    record: SymbolRecord,
    next: Option<ID<Self>>,
}

/// A hash table with a fixed number of buckets and separate chaining.
///
/// Chain nodes are owned by an internal [`Arena`]; the links between them are
/// [`ID`]s, so dropping the table releases every record exactly once.
/// New records are appended to the tail of their bucket's chain, which keeps
/// each chain in insertion order.
#[derive(Debug, Clone)]
pub struct ChainedScopeMap {
    heads: Vec<Option<ID<Node>>>,
    nodes: Arena<Node>,
}

impl ChainedScopeMap {
    /// Creates an empty table with `bucket_count` buckets.
    #[must_use]
    pub fn new(bucket_count: NonZeroUsize) -> Self {
        Self { heads: vec![None; bucket_count.get()], nodes: Arena::new() }
    }

    /// Returns the number of buckets, fixed at construction.
    #[must_use]
    pub fn bucket_count(&self) -> usize { self.heads.len() }

    /// Returns the number of records in the table.
    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns `true` if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Returns the bucket a name hashes into.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn bucket_of(&self, name: &str) -> usize {
        // the remainder is below the bucket count, which came from a `usize`
        (hash(name) % self.heads.len() as u64) as usize
    }

    fn chain_ids(&self, bucket: usize) -> impl Iterator<Item = ID<Node>> + '_ {
        let head = self.heads.get(bucket).copied().flatten();

        std::iter::successors(head, move |id| self.nodes[*id].next)
    }

    fn find(&self, name: &str) -> Option<(ID<Node>, Position)> {
        let bucket = self.bucket_of(name);

        self.chain_ids(bucket)
            .enumerate()
            .find(|(_, id)| self.nodes[*id].record.name() == name)
            .map(|(chain_index, id)| (id, Position::new(bucket, chain_index)))
    }

    /// Returns the records of one bucket, head first.
    ///
    /// An out-of-range bucket yields nothing.
    pub fn chain(
        &self,
        bucket: usize,
    ) -> impl Iterator<Item = &SymbolRecord> + '_ {
        self.chain_ids(bucket).map(move |id| &self.nodes[id].record)
    }

    /// Inserts `record` at the tail of its bucket's chain.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateNameError`] if a record with the same name is
    /// already present. The table is left unchanged.
    pub fn insert(
        &mut self,
        record: SymbolRecord,
    ) -> Result<Position, DuplicateNameError> {
        if let Some((_, position)) = self.find(record.name()) {
            return Err(DuplicateNameError {
                name: record.name().to_owned(),
                position,
            });
        }

        let bucket = self.bucket_of(record.name());
        let tail = self.chain_ids(bucket).enumerate().last();
        let id = self.nodes.insert(Node { record, next: None });

        let chain_index = if let Some((tail_index, tail)) = tail {
            self.nodes[tail].next = Some(id);
            tail_index + 1
        } else {
            self.heads[bucket] = Some(id);
            0
        };

        Ok(Position::new(bucket, chain_index))
    }

    /// Inserts a deep copy of `record`, codegen annex included.
    ///
    /// # Errors
    ///
    /// See [`Self::insert`].
    pub fn insert_copy(
        &mut self,
        record: &SymbolRecord,
    ) -> Result<Position, DuplicateNameError> {
        if let Some((_, position)) = self.find(record.name()) {
            return Err(DuplicateNameError {
                name: record.name().to_owned(),
                position,
            });
        }

        self.insert(record.clone())
    }

    /// Returns the record with the given name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SymbolRecord> {
        self.find(name).map(|(id, _)| &self.nodes[id].record)
    }

    /// Returns the record with the given name, mutably.
    #[must_use]
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolRecord> {
        let (id, _) = self.find(name)?;

        Some(&mut self.nodes[id].record)
    }

    /// Returns where the record with the given name sits.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<Position> {
        self.find(name).map(|(_, position)| position)
    }

    /// Unlinks and returns the record with the given name, along with the
    /// position it occupied.
    pub fn remove(&mut self, name: &str) -> Option<(SymbolRecord, Position)> {
        let (id, position) = self.find(name)?;
        let next = self.nodes[id].next;

        if position.chain_index == 0 {
            self.heads[position.bucket] = next;
        } else {
            let previous = self
                .chain_ids(position.bucket)
                .nth(position.chain_index - 1)?;
            self.nodes[previous].next = next;
        }

        self.nodes.remove(id).map(|node| (node.record, position))
    }
}

impl std::fmt::Display for ChainedScopeMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;

        for bucket in 0..self.bucket_count() {
            let mut chain = self.chain(bucket).peekable();

            if chain.peek().is_none() {
                continue;
            }

            write!(f, "\t\tBucket {bucket} : ")?;

            for (index, record) in chain.enumerate() {
                if index > 0 {
                    write!(f, " ")?;
                }

                write!(f, "{record}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
