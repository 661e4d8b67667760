//! # Hashchain Store
//!
//! Storage abstraction for Hashchain. Blocks are kept one record per
//! sequential index behind the [`ChainStore`] trait, so the ledger does not
//! care what medium holds them.
//!
//! ## Key Types
//!
//! - [`ChainStore`] - The blocking trait every backend implements
//! - [`StoreExt`] - Typed block/genesis helpers over any store
//! - [`FileStore`] - One JSON file per index in a directory
//! - [`SqliteStore`] - One row per index in a SQLite database
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hashchain_store::{ChainStore, FileStore};
//!
//! let store = FileStore::new("./Blockchain");
//! store.initialize().unwrap();
//! store.write(0, br#"{"title":"Blockchain","date":"now","author":"PixHead"}"#).unwrap();
//! assert_eq!(store.highest_index().unwrap(), 0);
//! ```
//!
//! ## Design Notes
//!
//! - **Blocking**: every call completes before returning, so
//!   `highest_index()` always reflects finished writes.
//! - **All-or-nothing writes**: a record is either fully persisted or absent.
//! - **No locking across calls**: a single writer is assumed.

pub mod error;
pub mod file;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ChainStore, InitOutcome, StoreExt};
