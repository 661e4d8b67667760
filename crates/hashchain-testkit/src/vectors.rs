//! Golden test vectors for deterministic verification.
//!
//! Fixed block fields with their canonical form and expected digest under
//! each algorithm. The legacy HMAC values match chains already on disk.

use hashchain_core::{Block, Digest, GenesisRecord, Payload};

use crate::fixtures::FIXED_TIMESTAMP;

/// A golden test vector for one block.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub index: u64,
    pub timestamp: &'static str,
    pub sender: &'static str,
    pub receiver: &'static str,
    pub amount: &'static str,
    pub previous: &'static str,
    /// Expected canonical string.
    pub canonical: &'static str,
    /// Expected SHA-256 digest (hex).
    pub sha256: &'static str,
    /// Expected legacy HMAC digest (hex).
    pub legacy_hmac: &'static str,
}

const ZERO_DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "first transfer",
            index: 1,
            timestamp: FIXED_TIMESTAMP,
            sender: "A",
            receiver: "B",
            amount: "10",
            previous: ZERO_DIGEST,
            canonical: "1Tue Jan 14 2025 12:00:00 GMT+0000AB10\
                        0000000000000000000000000000000000000000000000000000000000000000",
            sha256: "59c4898ee38698591a4c73f79f5efa2afae91b666bd0a7b8340416d99a4b91fa",
            legacy_hmac: "a64d33867d5902461f7003f45d5c86d4d902278c4e2b923d96997a32ab0459b9",
        },
        GoldenVector {
            name: "non-ascii parties",
            index: 2,
            timestamp: FIXED_TIMESTAMP,
            sender: "Zoë",
            receiver: "Łukasz",
            amount: "3.50",
            previous: ZERO_DIGEST,
            canonical: "2Tue Jan 14 2025 12:00:00 GMT+0000ZoëŁukasz3.50\
                        0000000000000000000000000000000000000000000000000000000000000000",
            sha256: "ca3d859445f58dc426cfc764bbb89368a3bc807ef2a62d54c74b6d6787051a43",
            legacy_hmac: "c821af9f7ee1b33f6fb011bfab7cd71bb5c6788fc516a479bb153eaf0b28d73a",
        },
        GoldenVector {
            name: "empty fields",
            index: 7,
            timestamp: "",
            sender: "",
            receiver: "",
            amount: "",
            previous: "",
            canonical: "7",
            sha256: "7902699be42c8a8e46fbbb4501726517e86b22c56a189f7625a6da49081b2451",
            legacy_hmac: "4487bed8e4d8b291601631eea675efd7cc300207c5f9cb57f583c473161d8579",
        },
    ]
}

/// Genesis record used by every fixture, and its digests.
pub fn genesis_vector() -> (GenesisRecord, &'static str, &'static str) {
    (
        GenesisRecord::new("Blockchain", FIXED_TIMESTAMP, "PixHead"),
        "8f7b63c531a294a3a6b41d2af8b2af3b19fe97990f902cfdf336843bbcc56eb9",
        "0d6d61410f57acf2d7f7d77e96af926abae4ab9856387dff1d0981881c50bbe0",
    )
}

/// Digests of blocks 1..=3 after appending `(A,B,10)`, `(B,C,5)`, `(C,A,2)`
/// to a fresh fixture: `(sha256, legacy_hmac)` per block.
pub const SCENARIO_DIGESTS: [(&str, &str); 3] = [
    (
        "06b4c6e7e55d880a0a69386207ae7dd8fd4da491ec4d3b0ee0fdcebddca95974",
        "398b7892564e5caf992c7fc6b0a76d7928a0af0d3bf91e60bf61e259a741553a",
    ),
    (
        "671df3bb8a567163245173cae7186fb59df2f6879789d8e420d66ef892100306",
        "b09e51f42e5d4675281096bb1f9195a14287cff6dcfa02413c01172a51656f55",
    ),
    (
        "4d63ba41689010c44c2f79a56c78cc70e2c80e0dd3624a90cb124cbefa15f876",
        "0b6c64b89d581aa8a2fa924eae7c256f1044decc84910ddf97d70b9e1a4dc92f",
    ),
];

/// Transfers of the standard three-block scenario.
pub const SCENARIO: [(&str, &str, &str); 3] = [("A", "B", "10"), ("B", "C", "5"), ("C", "A", "2")];

/// Build the block a vector describes. Its stored digest is left empty.
pub fn block_from_vector(vector: &GoldenVector) -> Block {
    Block {
        index: vector.index,
        timestamp: vector.timestamp.to_string(),
        payload: Payload::new(vector.sender, vector.receiver, vector.amount),
        previous_digest: Digest::from_stored(vector.previous),
        digest: Digest::from_stored(""),
    }
}
