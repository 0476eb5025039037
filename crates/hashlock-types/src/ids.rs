//! Identifiers used throughout Hashlock.
//!
//! `SwapId` is never random: it is derived deterministically from the full
//! immutable parameter tuple of the escrow, so identical duplicate
//! submissions collide with the existing record and are rejected instead of
//! silently creating a second escrow.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Hashlock, Timelock};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A ledger account address (20 raw bytes, hex-displayed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Random account address for tests and examples.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Handle naming one fungible asset kind (e.g. "ALICE", "BOB", "USDT").
///
/// The registry maps each `TokenId` to a registered [`crate::TokenTransfer`]
/// capability; it never inspects the asset itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub String);

impl TokenId {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SwapId
// ---------------------------------------------------------------------------

/// Unique identifier of one escrow instance.
///
/// Derived as SHA-256 over the full immutable parameter tuple, so every
/// party computes the **exact same** id for the same swap — and an
/// accidental resubmission of identical parameters is deterministically
/// rejected rather than overwriting or duplicating the escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SwapId(pub [u8; 32]);

impl SwapId {
    /// Deterministic `SwapId` from the immutable swap parameters.
    #[must_use]
    pub fn derive(
        sender: AccountId,
        receiver: AccountId,
        token: &TokenId,
        amount: Decimal,
        hashlock: Hashlock,
        timelock: Timelock,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"hashlock:swap_id:v1:");
        hasher.update(sender.0);
        hasher.update(receiver.0);
        hasher.update(u64::try_from(token.0.len()).unwrap_or(u64::MAX).to_le_bytes());
        hasher.update(token.0.as_bytes());
        hasher.update(amount.serialize());
        hasher.update(hashlock.0);
        hasher.update(timelock.timestamp_micros().to_le_bytes());
        Self(hasher.finalize().into())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Full hex form, for audit logs and external lookups.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
