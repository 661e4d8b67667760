//! # Hashchain
//!
//! An append-only ledger of value transfers. Each block commits to its
//! predecessor by recording the predecessor's digest, so editing any block
//! breaks a link that verification detects.
//!
//! ## Overview
//!
//! - **Genesis**: index 0, a fixed header (title, date, author) created once
//! - **Blocks**: indices 1..n, each a (sender, receiver, amount) transfer
//! - **Soft check**: every block still matches its own stored digest
//! - **Hard check**: every predecessor matches the link recorded after it
//!
//! ## Usage
//!
//! ```rust
//! use hashchain::{Ledger, LedgerConfig};
//! use hashchain::core::Payload;
//! use hashchain::store::MemoryStore;
//!
//! let ledger = Ledger::new(MemoryStore::new(), LedgerConfig::default());
//! ledger.append_block(Payload::new("A", "B", "10")).unwrap();
//! ledger.append_block(Payload::new("B", "C", "5")).unwrap();
//!
//! let report = ledger.verify_chain().unwrap();
//! assert!(report.is_intact());
//! ```
//!
//! ## Re-exports
//!
//! - `hashchain::core` - records, digests, canonical form
//! - `hashchain::store` - storage trait and backends

pub mod config;
pub mod error;
pub mod ledger;
pub mod verify;

pub use hashchain_core as core;
pub use hashchain_store as store;

pub use config::{LedgerConfig, DEFAULT_GENESIS_AUTHOR, DEFAULT_GENESIS_TITLE};
pub use error::{LedgerError, Result};
pub use ledger::{GenesisOutcome, Ledger, ListedBlock};
pub use verify::{
    ChainReport, ChainStatus, Defect, HardCheck, LinkFinding, SoftFinding, Verifier,
};

pub use hashchain_core::{Block, Digest, DigestAlgorithm, GenesisRecord, Payload};
