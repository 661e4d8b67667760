//! ChainStore trait: the abstract interface for block persistence.
//!
//! Records are opaque bytes keyed by sequential index. Index 0 holds the
//! genesis record. Typed access lives in [`StoreExt`].

use std::collections::BTreeSet;

use hashchain_core::{
    decode_block, decode_genesis, encode_block, encode_genesis, Block, GenesisRecord,
    GENESIS_INDEX,
};

use crate::error::{Result, StoreError};

/// Result of initializing a store container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The container was created.
    Created,
    /// The container already existed.
    AlreadyPresent,
}

/// The store trait: minimal blocking interface for block persistence.
///
/// Implementations can be a directory of files, a database, or memory.
/// The ledger only needs these operations.
pub trait ChainStore: Send + Sync {
    /// Whether the store container exists.
    fn is_initialized(&self) -> Result<bool>;

    /// Create the store container if it is absent.
    fn initialize(&self) -> Result<InitOutcome>;

    /// Whether a record exists at `index`.
    fn exists(&self, index: u64) -> Result<bool>;

    /// Read the raw record at `index`.
    ///
    /// Returns `StoreError::NotFound` when absent.
    fn read(&self, index: u64) -> Result<Vec<u8>>;

    /// Persist the raw record at `index`, replacing any previous record.
    fn write(&self, index: u64, bytes: &[u8]) -> Result<()>;

    /// All indices that currently hold a record, genesis included.
    fn list_indices(&self) -> Result<BTreeSet<u64>>;

    /// Highest index present, or 0 when only genesis (or nothing) is stored.
    fn highest_index(&self) -> Result<u64> {
        Ok(self.list_indices()?.last().copied().unwrap_or(GENESIS_INDEX))
    }
}

/// Typed helpers for reading and writing chain records.
pub trait StoreExt: ChainStore {
    /// Read and decode the block at `index`.
    fn read_block(&self, index: u64) -> Result<Block> {
        let bytes = self.read(index)?;
        decode_block(&bytes).map_err(|e| StoreError::InvalidRecord {
            index,
            reason: e.to_string(),
        })
    }

    /// Read the block at `index`, returning `None` when no record exists.
    fn try_read_block(&self, index: u64) -> Result<Option<Block>> {
        match self.read_block(index) {
            Ok(block) => Ok(Some(block)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Encode and persist a block under its own index.
    fn write_block(&self, block: &Block) -> Result<()> {
        let bytes = encode_block(block).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.write(block.index, &bytes)
    }

    /// Read and decode the genesis record.
    fn read_genesis(&self) -> Result<GenesisRecord> {
        let bytes = self.read(GENESIS_INDEX)?;
        decode_genesis(&bytes).map_err(|e| StoreError::InvalidRecord {
            index: GENESIS_INDEX,
            reason: e.to_string(),
        })
    }

    /// Encode and persist the genesis record at index 0.
    fn write_genesis(&self, genesis: &GenesisRecord) -> Result<()> {
        let bytes =
            encode_genesis(genesis).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.write(GENESIS_INDEX, &bytes)
    }

    /// Whether the genesis record is present.
    fn has_genesis(&self) -> Result<bool> {
        self.exists(GENESIS_INDEX)
    }
}

impl<S: ChainStore + ?Sized> StoreExt for S {}

impl<S: ChainStore + ?Sized> ChainStore for &S {
    fn is_initialized(&self) -> Result<bool> {
        (**self).is_initialized()
    }

    fn initialize(&self) -> Result<InitOutcome> {
        (**self).initialize()
    }

    fn exists(&self, index: u64) -> Result<bool> {
        (**self).exists(index)
    }

    fn read(&self, index: u64) -> Result<Vec<u8>> {
        (**self).read(index)
    }

    fn write(&self, index: u64, bytes: &[u8]) -> Result<()> {
        (**self).write(index, bytes)
    }

    fn list_indices(&self) -> Result<BTreeSet<u64>> {
        (**self).list_indices()
    }

    fn highest_index(&self) -> Result<u64> {
        (**self).highest_index()
    }
}
