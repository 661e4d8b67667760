//! Canonical forms and the persisted encoding.
//!
//! The canonical form of a block is the undelimited concatenation
//!
//! ```text
//! index (decimal) || timestamp || sender || receiver || amount || previous_digest
//! ```
//!
//! and of the genesis record `title || timestamp || author`. Writers and
//! verifiers must derive it identically. Any divergence breaks every digest
//! in the chain.
//!
//! Records are persisted as compact JSON, one record per storage key.

use crate::error::CoreError;
use crate::record::{Block, GenesisRecord, Payload};
use crate::types::Digest;

/// Canonical string for a block's fields (the stored digest is never included).
pub fn canonical_block(
    index: u64,
    timestamp: &str,
    payload: &Payload,
    previous_digest: &Digest,
) -> String {
    let mut out = String::with_capacity(
        20 + timestamp.len()
            + payload.fields().iter().map(|f| f.len()).sum::<usize>()
            + previous_digest.as_str().len(),
    );
    out.push_str(&index.to_string());
    out.push_str(timestamp);
    for field in payload.fields() {
        out.push_str(field);
    }
    out.push_str(previous_digest.as_str());
    out
}

/// Canonical string for the genesis record.
pub fn canonical_genesis(genesis: &GenesisRecord) -> String {
    let mut out = String::with_capacity(
        genesis.title.len() + genesis.timestamp.len() + genesis.author.len(),
    );
    out.push_str(&genesis.title);
    out.push_str(&genesis.timestamp);
    out.push_str(&genesis.author);
    out
}

/// Encode a block to its persisted bytes.
pub fn encode_block(block: &Block) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(block).map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Decode a block from its persisted bytes.
pub fn decode_block(bytes: &[u8]) -> Result<Block, CoreError> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::Decoding(e.to_string()))
}

/// Encode the genesis record to its persisted bytes.
pub fn encode_genesis(genesis: &GenesisRecord) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(genesis).map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Decode the genesis record from its persisted bytes.
pub fn decode_genesis(bytes: &[u8]) -> Result<GenesisRecord, CoreError> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::Decoding(e.to_string()))
}
