//! Events announcing registry state transitions.
//!
//! This is the only surface indexers and UIs need: swap status is fully
//! reconstructible from the event stream without registry read access.
//! `Withdrawn` deliberately carries the secret in the clear — publishing it
//! is the mechanism that makes the counterparty escrow (sharing the same
//! hashlock on the other ledger) claimable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Hashlock, Secret, SwapId, Timelock, TokenId};

/// A state transition announced by a swap registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapEvent {
    /// A new escrow was funded.
    Created {
        id: SwapId,
        sender: AccountId,
        receiver: AccountId,
        token: TokenId,
        amount: Decimal,
        hashlock: Hashlock,
        timelock: Timelock,
    },
    /// The receiver claimed the escrow, revealing the secret.
    Withdrawn { id: SwapId, secret: Secret },
    /// The sender reclaimed the escrow after expiry.
    Refunded { id: SwapId },
}

impl SwapEvent {
    /// The swap this event is about.
    #[must_use]
    pub fn id(&self) -> SwapId {
        match self {
            Self::Created { id, .. } | Self::Withdrawn { id, .. } | Self::Refunded { id } => *id,
        }
    }
}
