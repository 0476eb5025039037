//! The swap record: one escrow instance and its terminal flags.
//!
//! A record is created once, mutated at most once (by whichever of
//! withdrawal or refund wins), and never deleted — the terminal record
//! stays queryable as an audit trail.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Hashlock, Secret, SwapId, Timelock, TokenId};

/// Externally-observable lifecycle state, as reconstructed by indexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    /// Created, neither unlock path taken yet.
    Pending,
    /// Receiver presented the secret and claimed the funds.
    Completed,
    /// Sender reclaimed the funds after expiry.
    Refunded,
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Refunded => write!(f, "REFUNDED"),
        }
    }
}

/// One escrow instance in a [`crate::TokenId`]-denominated asset.
///
/// All fields except `withdrawn`, `refunded` and `preimage` are immutable
/// after creation. `preimage` is `Some` if and only if `withdrawn` is true,
/// and always hashes to `hashlock` once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    pub id: SwapId,
    /// Funded the escrow; entitled to a refund after expiry.
    pub sender: AccountId,
    /// Entitled to withdraw before expiry by presenting the secret.
    pub receiver: AccountId,
    pub token: TokenId,
    pub amount: Decimal,
    pub hashlock: Hashlock,
    pub timelock: Timelock,
    pub withdrawn: bool,
    pub refunded: bool,
    /// The revealed secret; set exactly once, at withdrawal.
    pub preimage: Option<Secret>,
    pub created_at: DateTime<Utc>,
}

impl SwapRecord {
    /// Status as an indexer would report it.
    #[must_use]
    pub fn status(&self) -> SwapStatus {
        if self.withdrawn {
            SwapStatus::Completed
        } else if self.refunded {
            SwapStatus::Refunded
        } else {
            SwapStatus::Pending
        }
    }

    /// Whether either terminal transition has happened.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.withdrawn || self.refunded
    }
}
