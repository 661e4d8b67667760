//! # Hashchain Core
//!
//! Pure primitives for Hashchain: block records, canonicalization, and
//! digests.
//!
//! This crate contains no I/O and no storage. It is pure computation over
//! the records that make up a hash-chained ledger.
//!
//! ## Key Types
//!
//! - [`Block`] - One record in the chain, committing to its predecessor
//! - [`GenesisRecord`] - The fixed index-0 root record
//! - [`Payload`] - The application data carried by a block
//! - [`Digest`] - Hex-encoded cryptographic digest of a canonical form
//! - [`DigestAlgorithm`] - Which hash construction produces digests
//!
//! ## Canonicalization
//!
//! Digests are computed over an undelimited concatenation of a record's
//! fields. See the [`canonical`] module.

pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{
    canonical_block, canonical_genesis, decode_block, decode_genesis, encode_block,
    encode_genesis,
};
pub use clock::{Clock, FixedClock, SystemClock, DEFAULT_TIMESTAMP_FORMAT};
pub use crypto::DigestAlgorithm;
pub use error::{CoreError, ValidationError};
pub use record::{Block, BlockBuilder, GenesisRecord, Payload, GENESIS_INDEX};
pub use types::Digest;
pub use validation::validate_payload;
