//! Payload checksums.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 digest of a photo payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadChecksum(String);

impl PayloadChecksum {
    /// Computes the checksum of `data`.
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Returns `true` when `data` hashes to this checksum.
    #[must_use]
    pub fn matches(&self, data: &[u8]) -> bool {
        *self == Self::compute(data)
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayloadChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
