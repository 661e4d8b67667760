//! Strong type definitions for Hashchain.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Length in hex characters of every digest the engine produces.
pub const DIGEST_HEX_LEN: usize = 64;

/// A hex-encoded digest as it appears in stored blocks.
///
/// Stored digests are compared as text, so a tampered or truncated value
/// still deserializes and simply fails to match. Use [`Digest::parse`] for
/// untrusted input that must be well-formed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap raw digest bytes as lowercase hex.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse a hex digest, rejecting anything the engine could not have produced.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(CoreError::InvalidDigest(format!(
                "expected {} hex characters, got {}",
                DIGEST_HEX_LEN,
                s.len()
            )));
        }
        hex::decode(s).map_err(|e| CoreError::InvalidDigest(e.to_string()))?;
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Wrap a stored value without validation.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for logs.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(16);
        self.0.get(..end).unwrap_or(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
