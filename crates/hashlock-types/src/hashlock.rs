//! The hash commitment primitive: secret / hashlock pairs.
//!
//! The whole protocol reduces to the hardness of this function: whoever can
//! present a `Secret` whose SHA-256 digest equals the stored [`Hashlock`]
//! is entitled to withdraw. Collision or preimage attacks on SHA-256 would
//! break the escrow, nothing else in the registry relies on secrecy.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A 32-byte secret preimage. Chosen off-chain by the swap initiator and
/// revealed publicly at withdrawal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Secret(pub [u8; 32]);

impl Secret {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the hash commitment for this secret.
    #[must_use]
    pub fn commit(&self) -> Hashlock {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        Hashlock(hasher.finalize().into())
    }

    /// Fresh random secret, for tests and for parties initiating a swap.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A SHA-256 commitment over a [`Secret`]. Immutable once a swap is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Hashlock(pub [u8; 32]);

impl Hashlock {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Whether the presented secret hashes to this commitment.
    #[must_use]
    pub fn matches(&self, secret: &Secret) -> bool {
        secret.commit() == *self
    }
}

impl fmt::Display for Hashlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
