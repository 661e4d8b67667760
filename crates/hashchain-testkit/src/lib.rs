//! # Hashchain Testkit
//!
//! Testing utilities for Hashchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed inputs with known digests under each algorithm
//! - **Generators**: Proptest strategies for payloads and chains
//! - **Fixtures**: Ledgers over memory or temp-dir storage, plus tamper helpers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use hashchain_testkit::vectors::{all_vectors, block_from_vector};
//! use hashchain_core::DigestAlgorithm;
//!
//! for vector in all_vectors() {
//!     let block = block_from_vector(&vector);
//!     assert_eq!(block.compute_digest(DigestAlgorithm::Sha256).as_str(), vector.sha256);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use hashchain_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! fixture.build_chain(&[("A", "B", "10"), ("B", "C", "5")]);
//! fixture.tamper_payload(1, "MALLORY");
//! assert!(!fixture.ledger.verify_chain().unwrap().is_intact());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{FileFixture, TestFixture, FIXED_TIMESTAMP, FIXED_UNIX};
pub use generators::{block_from_params, chain_params, payload, BlockParams, ChainParams};
pub use vectors::{
    all_vectors, block_from_vector, genesis_vector, GoldenVector, SCENARIO, SCENARIO_DIGESTS,
};
