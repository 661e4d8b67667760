//! Ledger configuration.

use hashchain_core::{DigestAlgorithm, DEFAULT_TIMESTAMP_FORMAT};

/// Default genesis title.
pub const DEFAULT_GENESIS_TITLE: &str = "Blockchain";

/// Default genesis author.
pub const DEFAULT_GENESIS_AUTHOR: &str = "PixHead";

/// Configuration for the Ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Digest construction for every record in the chain.
    pub digest: DigestAlgorithm,
    /// Title written into a new genesis record.
    pub genesis_title: String,
    /// Author written into a new genesis record.
    pub genesis_author: String,
    /// `strftime` format for creation timestamps.
    pub timestamp_format: String,
}

impl LedgerConfig {
    /// Default configuration with a different digest algorithm.
    pub fn with_digest(digest: DigestAlgorithm) -> Self {
        Self {
            digest,
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::default(),
            genesis_title: DEFAULT_GENESIS_TITLE.to_string(),
            genesis_author: DEFAULT_GENESIS_AUTHOR.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}
