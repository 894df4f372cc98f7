//! The symbol table of the compiler front end.
//!
//! The table is a stack of lexical scopes. Each [`Scope`] owns a
//! [`ChainedScopeMap`]: a fixed-size hash table whose buckets are chains of
//! [`SymbolRecord`]s. The [`ScopeStack`] routes declarations to the innermost
//! scope and resolves names outward through the enclosing scopes, so an inner
//! declaration shadows an outer one without destroying it.
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use symtab_table::ScopeStack;
//!
//! let mut table = ScopeStack::new(NonZeroUsize::new(7).unwrap());
//!
//! table.insert("x", "ID").unwrap();
//! table.enter_scope();
//! table.insert_with_semantic_type("x", "ID", "float").unwrap();
//!
//! assert_eq!(table.lookup("x").unwrap().semantic_type(), Some("float"));
//!
//! table.exit_scope();
//!
//! assert_eq!(table.lookup("x").unwrap().semantic_type(), None);
//! ```

pub mod map;
pub mod record;
pub mod scope;
pub mod stack;

pub use map::{ChainedScopeMap, DuplicateNameError, Position};
pub use record::{CodegenAnnex, SymbolRecord};
pub use scope::Scope;
pub use stack::{Location, ScopeStack};
