//! The Ledger: genesis initialization, chain building, and listing.
//!
//! The Ledger owns an explicit store handle. Nothing about the chain's
//! location is global; callers construct one Ledger per chain and pass it by
//! reference.

use std::sync::Arc;

use hashchain_core::{
    Block, BlockBuilder, Clock, Digest, GenesisRecord, Payload, SystemClock, GENESIS_INDEX,
};
use hashchain_store::{ChainStore, InitOutcome, StoreError, StoreExt};
use tracing::{debug, info};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::verify::{ChainReport, Verifier};

/// What [`Ledger::ensure_genesis`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenesisOutcome {
    /// A new genesis record was written.
    Created(GenesisRecord),
    /// A genesis record was already present; nothing was written.
    Found,
}

/// One entry of [`Ledger::list_blocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListedBlock {
    /// The block decoded successfully.
    Present(Block),
    /// No usable record at this index (missing or undecodable).
    Unavailable { index: u64 },
}

impl ListedBlock {
    /// The chain index of this entry.
    pub fn index(&self) -> u64 {
        match self {
            ListedBlock::Present(block) => block.index,
            ListedBlock::Unavailable { index } => *index,
        }
    }
}

/// The main Ledger struct.
///
/// Single-writer: resolving the tail and appending after it are separate
/// store calls with no lock between them.
pub struct Ledger<S: ChainStore> {
    store: S,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
}

impl<S: ChainStore> Ledger<S> {
    /// Create a ledger over `store` using the system clock.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create a ledger with an explicit clock.
    pub fn with_clock(store: S, config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Consume the ledger and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write path
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the store container and the genesis record if either is absent.
    ///
    /// Idempotent: an existing genesis record is never rewritten.
    pub fn ensure_genesis(&self) -> Result<GenesisOutcome> {
        if self.store.initialize()? == InitOutcome::Created {
            info!("directory created");
        }

        if self.store.has_genesis()? {
            info!("genesis block found");
            return Ok(GenesisOutcome::Found);
        }

        let genesis = GenesisRecord::new(
            self.config.genesis_title.clone(),
            self.clock.now(&self.config.timestamp_format)?,
            self.config.genesis_author.clone(),
        );
        self.store.write_genesis(&genesis)?;
        info!("genesis block created");
        Ok(GenesisOutcome::Created(genesis))
    }

    /// Highest index in the chain, initializing the chain first if needed.
    pub fn last_index(&self) -> Result<u64> {
        self.ensure_genesis()?;
        Ok(self.store.highest_index()?)
    }

    /// Digest that block `last_index + 1` must record as its predecessor.
    ///
    /// Recomputed from the predecessor's stored fields; its stored digest is
    /// not trusted.
    pub fn tail_digest(&self, last_index: u64) -> Result<Digest> {
        if last_index == GENESIS_INDEX {
            let genesis = self.store.read_genesis()?;
            return Ok(genesis.digest(self.config.digest));
        }
        let previous = self.store.read_block(last_index)?;
        Ok(previous.compute_digest(self.config.digest))
    }

    /// Append a block carrying `payload` after the current tail.
    pub fn append_block(&self, payload: Payload) -> Result<Block> {
        let last_index = self.last_index()?;
        let index = last_index
            .checked_add(1)
            .ok_or(StoreError::IndexOutOfRange(last_index))?;
        let previous_digest = self.tail_digest(last_index)?;
        let timestamp = self.clock.now(&self.config.timestamp_format)?;

        let block = BlockBuilder::new(index)
            .timestamp(timestamp)
            .payload(payload)
            .previous(previous_digest)
            .seal(self.config.digest);

        info!(previous = last_index, "previous block: {}", last_index);
        self.store.write_block(&block)?;
        debug!(index = block.index, digest = %block.digest.short(), "block saved");
        Ok(block)
    }

    /// Append from positional write arguments, checking their arity first.
    pub fn append_args(&self, args: &[String]) -> Result<Block> {
        let payload = Payload::try_from(args)?;
        self.append_block(payload)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read path
    // ─────────────────────────────────────────────────────────────────────────

    /// Fail fast unless both the store container and genesis exist.
    ///
    /// The read path never initializes anything.
    pub fn require_chain(&self) -> Result<()> {
        if !self.store.is_initialized()? {
            return Err(LedgerError::MissingChainDirectory(
                "chain store has not been created".into(),
            ));
        }
        if !self.store.has_genesis()? {
            return Err(LedgerError::MissingGenesisBlock);
        }
        Ok(())
    }

    /// The genesis record and its derived digest.
    pub fn genesis(&self) -> Result<(GenesisRecord, Digest)> {
        self.require_chain()?;
        let genesis = self.store.read_genesis()?;
        let digest = genesis.digest(self.config.digest);
        Ok((genesis, digest))
    }

    /// Every index in `[1, last_index]`, decoded where possible.
    pub fn list_blocks(&self) -> Result<Vec<ListedBlock>> {
        // The tail index comes from stored keys, so it bounds nothing.
        let mut listed = Vec::new();
        for entry in self.blocks()? {
            listed.push(entry?);
        }
        Ok(listed)
    }

    /// Walk `[1, last_index]` lazily, one store read per step.
    pub fn blocks(&self) -> Result<impl Iterator<Item = Result<ListedBlock>> + '_> {
        self.require_chain()?;
        let last_index = self.store.highest_index()?;
        Ok((1..=last_index).map(move |index| self.listed(index)))
    }

    fn listed(&self, index: u64) -> Result<ListedBlock> {
        match self.store.read_block(index) {
            Ok(block) => Ok(ListedBlock::Present(block)),
            Err(StoreError::NotFound(_)) | Err(StoreError::InvalidRecord { .. }) => {
                Ok(ListedBlock::Unavailable { index })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run the soft and hard checks over the whole chain.
    pub fn verify_chain(&self) -> Result<ChainReport> {
        self.require_chain()?;
        self.verifier().run()
    }

    /// A verifier bound to this ledger's store and digest algorithm.
    pub fn verifier(&self) -> Verifier<'_, S> {
        Verifier::new(&self.store, self.config.digest)
    }
}
