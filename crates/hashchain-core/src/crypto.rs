//! The digest engine.
//!
//! Every digest is 32 bytes rendered as lowercase hex. Three constructions
//! are available; [`DigestAlgorithm::Sha256`] is the default.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Digest;

/// Hash construction used to turn a canonical string into a [`Digest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlgorithm {
    /// Unkeyed SHA-256.
    #[default]
    Sha256,
    /// HMAC-SHA256 keyed with the text, over an empty message.
    ///
    /// Reproduces chains written by the JavaScript `main.js` tool. The key
    /// adds nothing over a plain hash; use it only for compatibility.
    LegacyHmac,
    /// Unkeyed BLAKE3.
    Blake3,
}

impl DigestAlgorithm {
    /// All supported algorithms.
    pub const ALL: [DigestAlgorithm; 3] = [Self::Sha256, Self::LegacyHmac, Self::Blake3];

    /// Compute the digest of `text`.
    pub fn digest(self, text: &str) -> Digest {
        let bytes = text.as_bytes();
        match self {
            Self::Sha256 => Digest::from_bytes(&Sha256::digest(bytes)),
            Self::LegacyHmac => {
                // Keyed with the text over an empty message.
                let mac = <Hmac<Sha256> as Mac>::new_from_slice(bytes)
                    .expect("HMAC accepts keys of any length");
                Digest::from_bytes(&mac.finalize().into_bytes())
            }
            Self::Blake3 => Digest::from_bytes(blake3::hash(bytes).as_bytes()),
        }
    }

    /// The name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::LegacyHmac => "legacy-hmac",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "legacy-hmac" | "hmac" => Ok(Self::LegacyHmac),
            "blake3" => Ok(Self::Blake3),
            other => Err(CoreError::UnknownAlgorithm(other.to_string())),
        }
    }
}
