//! Error types for Hashchain Core.

use thiserror::Error;

/// Core errors that can occur while encoding or decoding records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid timestamp format: {0}")]
    InvalidTimestampFormat(String),
}

/// Validation errors for block payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing payload field: {0}")]
    MissingField(&'static str),

    #[error("expected {expected} payload fields, got {got}")]
    Arity { expected: usize, got: usize },
}
