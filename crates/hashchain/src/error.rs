//! Error types for the ledger.

use hashchain_core::{CoreError, Digest, ValidationError};
use hashchain_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The store container (chain directory, database file) does not exist.
    #[error("chain not found: {0}")]
    MissingChainDirectory(String),

    /// The chain exists but has no genesis record at index 0.
    #[error("genesis block not found")]
    MissingGenesisBlock,

    /// An index in range has no stored record.
    #[error("block {0} not found")]
    MissingBlock(u64),

    /// A block's stored digest does not match its stored fields.
    #[error("block {index} digest mismatch: computed {computed}, stored {stored}")]
    DigestMismatch {
        index: u64,
        computed: Digest,
        stored: Digest,
    },

    /// A block does not link to its predecessor's content.
    #[error("link from block {index} broken: computed {computed}, recorded {recorded}")]
    LinkMismatch {
        index: u64,
        computed: Digest,
        recorded: Digest,
    },

    /// A stored record could not be decoded.
    #[error("block {index} is malformed: {reason}")]
    MalformedBlock { index: u64, reason: String },

    /// Write arguments failed the structural check.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage failure.
    #[error("storage error: {0}")]
    Storage(StoreError),

    /// Encoding failure.
    #[error("encoding error: {0}")]
    Core(#[from] CoreError),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotInitialized(what) => LedgerError::MissingChainDirectory(what),
            StoreError::NotFound(index) => LedgerError::MissingBlock(index),
            StoreError::InvalidRecord { index, reason } => {
                LedgerError::MalformedBlock { index, reason }
            }
            other => LedgerError::Storage(other),
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_ledger_kinds() {
        assert!(matches!(
            LedgerError::from(StoreError::NotInitialized("dir".into())),
            LedgerError::MissingChainDirectory(_)
        ));
        assert!(matches!(
            LedgerError::from(StoreError::NotFound(4)),
            LedgerError::MissingBlock(4)
        ));
        assert!(matches!(
            LedgerError::from(StoreError::InvalidRecord {
                index: 2,
                reason: "bad".into()
            }),
            LedgerError::MalformedBlock { index: 2, .. }
        ));
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            LedgerError::from(StoreError::Io(io)),
            LedgerError::Storage(_)
        ));
    }
}
