//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Helpers panic on storage
//! failures; they are meant for tests only.

use std::fs;
use std::sync::Arc;

use hashchain::{Ledger, LedgerConfig};
use hashchain_core::{Block, DigestAlgorithm, FixedClock, Payload};
use hashchain_store::{ChainStore, FileStore, MemoryStore, StoreExt};
use tempfile::TempDir;

/// Unix time every fixture clock is frozen at.
pub const FIXED_UNIX: i64 = 1_736_856_000;

/// [`FIXED_UNIX`] rendered in the default timestamp format.
pub const FIXED_TIMESTAMP: &str = "Tue Jan 14 2025 12:00:00 GMT+0000";

/// A ledger with a frozen clock over some store.
pub struct TestFixture<S: ChainStore = MemoryStore> {
    pub ledger: Ledger<S>,
    // Keeps the temp directory alive for file-backed fixtures.
    _dir: Option<TempDir>,
}

/// Fixture over a [`FileStore`] in a fresh temp directory.
pub type FileFixture = TestFixture<FileStore>;

fn frozen_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::from_unix(FIXED_UNIX).expect("fixed time is in range"))
}

impl TestFixture<MemoryStore> {
    /// In-memory ledger with the default configuration.
    pub fn new() -> Self {
        Self::with_digest(DigestAlgorithm::default())
    }

    /// In-memory ledger using `digest`.
    pub fn with_digest(digest: DigestAlgorithm) -> Self {
        Self {
            ledger: Ledger::with_clock(
                MemoryStore::new(),
                LedgerConfig::with_digest(digest),
                frozen_clock(),
            ),
            _dir: None,
        }
    }

    /// Remove the record at `index`.
    pub fn delete_block(&self, index: u64) {
        self.store().remove(index).expect("remove record");
    }
}

impl Default for TestFixture<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture<FileStore> {
    /// File-backed ledger whose chain directory does not exist yet.
    pub fn in_temp_dir() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileStore::new(dir.path().join("Blockchain"));
        Self {
            ledger: Ledger::with_clock(store, LedgerConfig::default(), frozen_clock()),
            _dir: Some(dir),
        }
    }

    /// Delete the record file at `index`.
    pub fn delete_block(&self, index: u64) {
        fs::remove_file(self.store().record_path(index)).expect("remove record file");
    }
}

impl<S: ChainStore> TestFixture<S> {
    /// The underlying store.
    pub fn store(&self) -> &S {
        self.ledger.store()
    }

    /// Append one block per `(sender, receiver, amount)`.
    pub fn build_chain(&self, transfers: &[(&str, &str, &str)]) -> Vec<Block> {
        transfers
            .iter()
            .map(|(s, r, a)| {
                self.ledger
                    .append_block(Payload::new(*s, *r, *a))
                    .expect("append block")
            })
            .collect()
    }

    /// Append `n` generated transfers.
    pub fn build_chain_of(&self, n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| {
                self.ledger
                    .append_block(Payload::new(
                        format!("sender-{i}"),
                        format!("receiver-{i}"),
                        (i * 10).to_string(),
                    ))
                    .expect("append block")
            })
            .collect()
    }

    /// Read the stored block at `index`.
    pub fn block(&self, index: u64) -> Block {
        self.store().read_block(index).expect("read block")
    }

    /// Change the receiver of block `index`, leaving its digest stale.
    pub fn tamper_payload(&self, index: u64, receiver: &str) {
        let mut block = self.block(index);
        block.payload.receiver = receiver.to_string();
        self.store().write_block(&block).expect("write tampered block");
    }

    /// Change the receiver of block `index` and recompute its own digest.
    ///
    /// The block stays self-consistent; only the link from its successor
    /// exposes the edit.
    pub fn tamper_and_reseal(&self, index: u64, receiver: &str) {
        let mut block = self.block(index);
        block.payload.receiver = receiver.to_string();
        block.digest = block.compute_digest(self.ledger.config().digest);
        self.store().write_block(&block).expect("write resealed block");
    }

    /// Overwrite the record at `index` with bytes that do not decode.
    pub fn corrupt_record(&self, index: u64) {
        self.store()
            .write(index, b"{\"index\": ")
            .expect("write corrupt record");
    }

    /// Stored record at `index` as JSON.
    pub fn raw_json(&self, index: u64) -> serde_json::Value {
        let bytes = self.store().read(index).expect("read record");
        serde_json::from_slice(&bytes).expect("record is JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashchain_core::GENESIS_INDEX;

    #[test]
    fn test_fixture_timestamps_are_frozen() {
        let fixture = TestFixture::new();
        let blocks = fixture.build_chain(&[("A", "B", "10")]);
        assert_eq!(blocks[0].timestamp, FIXED_TIMESTAMP);
        assert_eq!(fixture.raw_json(GENESIS_INDEX)["date"], FIXED_TIMESTAMP);
    }

    #[test]
    fn test_tamper_and_reseal_stays_self_consistent() {
        let fixture = TestFixture::new();
        fixture.build_chain_of(3);
        fixture.tamper_and_reseal(2, "MALLORY");

        let block = fixture.block(2);
        assert_eq!(block.payload.receiver, "MALLORY");
        assert!(block.is_self_consistent(DigestAlgorithm::Sha256));
    }

    #[test]
    fn test_file_fixture_starts_empty() {
        let fixture = FileFixture::in_temp_dir();
        assert!(!fixture.store().is_initialized().unwrap());
        fixture.build_chain_of(2);
        assert!(fixture.store().record_path(2).exists());
        fixture.delete_block(2);
        assert!(!fixture.store().exists(2).unwrap());
    }
}
