//! In-memory implementation of the ChainStore trait.
//!
//! This is primarily for testing. It has the same semantics as the file
//! store but keeps everything in memory with no persistence. A fresh store
//! starts uninitialized, like a chain directory that was never created.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StoreError};
use crate::traits::{ChainStore, InitOutcome};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    initialized: bool,
    records: BTreeMap<u64, Vec<u8>>,
}

impl MemoryStore {
    /// Create a new, uninitialized in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                initialized: false,
                records: BTreeMap::new(),
            }),
        }
    }

    /// Drop the record at `index`, simulating an external deletion.
    pub fn remove(&self, index: u64) -> Result<Option<Vec<u8>>> {
        Ok(self.write_inner()?.records.remove(&index))
    }

    /// Number of stored records, genesis included.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_inner()?.records.len())
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_inner()?.records.is_empty())
    }

    fn read_inner(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write_inner(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainStore for MemoryStore {
    fn is_initialized(&self) -> Result<bool> {
        Ok(self.read_inner()?.initialized)
    }

    fn initialize(&self) -> Result<InitOutcome> {
        let mut inner = self.write_inner()?;
        if inner.initialized {
            return Ok(InitOutcome::AlreadyPresent);
        }
        inner.initialized = true;
        Ok(InitOutcome::Created)
    }

    fn exists(&self, index: u64) -> Result<bool> {
        Ok(self.read_inner()?.records.contains_key(&index))
    }

    fn read(&self, index: u64) -> Result<Vec<u8>> {
        self.read_inner()?
            .records
            .get(&index)
            .cloned()
            .ok_or(StoreError::NotFound(index))
    }

    fn write(&self, index: u64, bytes: &[u8]) -> Result<()> {
        let mut inner = self.write_inner()?;
        if !inner.initialized {
            return Err(StoreError::NotInitialized("memory store".into()));
        }
        inner.records.insert(index, bytes.to_vec());
        Ok(())
    }

    fn list_indices(&self) -> Result<BTreeSet<u64>> {
        Ok(self.read_inner()?.records.keys().copied().collect())
    }
}
