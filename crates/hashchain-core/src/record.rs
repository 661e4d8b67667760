//! Records: the genesis root and the blocks chained after it.
//!
//! Field names on the wire match the JSON files of existing chains,
//! including the `reciever` spelling.

use serde::{Deserialize, Deserializer, Serialize};

use crate::canonical::{canonical_block, canonical_genesis};
use crate::crypto::DigestAlgorithm;
use crate::types::Digest;

/// Storage index of the genesis record.
pub const GENESIS_INDEX: u64 = 0;

/// Application data carried by a block. Opaque to the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub sender: String,

    #[serde(rename = "reciever")]
    pub receiver: String,

    /// Amount as text. Hand-edited chains may store a JSON number here.
    #[serde(rename = "sum", deserialize_with = "text_or_number")]
    pub amount: String,
}

impl Payload {
    /// Create a payload from its three fields.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount: amount.into(),
        }
    }

    /// Fields in their canonical order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.sender, &self.receiver, &self.amount]
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

/// The fixed-shape root record stored at index 0.
///
/// It carries no digest fields. Its digest is derived on demand from
/// `title + timestamp + author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisRecord {
    pub title: String,

    #[serde(rename = "date")]
    pub timestamp: String,

    pub author: String,
}

impl GenesisRecord {
    /// Create a genesis record.
    pub fn new(
        title: impl Into<String>,
        timestamp: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            timestamp: timestamp.into(),
            author: author.into(),
        }
    }

    /// The canonical string hashed to anchor block 1.
    pub fn canonical(&self) -> String {
        canonical_genesis(self)
    }

    /// Digest of the canonical form.
    pub fn digest(&self, algorithm: DigestAlgorithm) -> Digest {
        algorithm.digest(&self.canonical())
    }
}

/// One block in the chain (index >= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,

    #[serde(rename = "date")]
    pub timestamp: String,

    #[serde(rename = "data")]
    pub payload: Payload,

    /// Digest of the predecessor's canonical form, as recorded at creation.
    #[serde(rename = "prehash")]
    pub previous_digest: Digest,

    /// Digest of this block's canonical form, as recorded at creation.
    #[serde(rename = "hash")]
    pub digest: Digest,
}

impl Block {
    /// The canonical string over the stored fields (excluding `digest`).
    pub fn canonical(&self) -> String {
        canonical_block(
            self.index,
            &self.timestamp,
            &self.payload,
            &self.previous_digest,
        )
    }

    /// Recompute the digest from the stored fields.
    pub fn compute_digest(&self, algorithm: DigestAlgorithm) -> Digest {
        algorithm.digest(&self.canonical())
    }

    /// Whether the stored digest matches the stored fields.
    ///
    /// This proves internal consistency only. A block whose fields and
    /// digest were rewritten together still passes.
    pub fn is_self_consistent(&self, algorithm: DigestAlgorithm) -> bool {
        self.compute_digest(algorithm) == self.digest
    }
}

/// Builder for constructing blocks.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    index: u64,
    timestamp: String,
    payload: Payload,
    previous_digest: Digest,
}

impl BlockBuilder {
    /// Start building the block at `index`.
    pub fn new(index: u64) -> Self {
        Self {
            index,
            timestamp: String::new(),
            payload: Payload::default(),
            previous_digest: Digest::from_stored(""),
        }
    }

    /// Set the rendered creation timestamp.
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Set the payload.
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Set the predecessor digest.
    pub fn previous(mut self, previous_digest: Digest) -> Self {
        self.previous_digest = previous_digest;
        self
    }

    /// Compute the digest over the collected fields and produce the block.
    pub fn seal(self, algorithm: DigestAlgorithm) -> Block {
        let digest = algorithm.digest(&canonical_block(
            self.index,
            &self.timestamp,
            &self.payload,
            &self.previous_digest,
        ));

        Block {
            index: self.index,
            timestamp: self.timestamp,
            payload: self.payload,
            previous_digest: self.previous_digest,
            digest,
        }
    }
}
