//! Timelock ordering discipline for the two-sided swap.
//!
//! The registry only observes one ledger, so it cannot enforce the
//! cross-ledger timing rule; this module makes the rule explicit for the
//! callers who set up both sides. The party withdrawing second — the
//! counterparty of the original secret holder — must be given a strictly
//! earlier expiry, so the secret-revealing withdrawal always has time to
//! propagate before the counterparty escrow could be refunded out from
//! under it.

use chrono::{DateTime, Duration, Utc};
use hashlock_types::{Result, SwapError, Timelock};

/// Lock durations for the two sides of a swap.
///
/// `initiator_lock` gates the escrow the secret holder funds (claimed
/// second, by the counterparty); `counterparty_lock` gates the escrow the
/// counterparty funds (claimed first, by the secret holder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChoreographyConfig {
    /// Seconds until the initiator-funded escrow expires.
    pub initiator_lock_secs: i64,
    /// Seconds until the counterparty-funded escrow expires. Must be
    /// strictly smaller than `initiator_lock_secs`.
    pub counterparty_lock_secs: i64,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            initiator_lock_secs: 10,
            counterparty_lock_secs: 5,
        }
    }
}

/// A validated pair of absolute expiries for one two-sided swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelockPlan {
    /// Expiry of the escrow the initiator funds.
    pub initiator_expiry: Timelock,
    /// Expiry of the escrow the counterparty funds. Strictly earlier.
    pub counterparty_expiry: Timelock,
}

impl TimelockPlan {
    /// Build a plan anchored at `now`, validating the ordering discipline.
    ///
    /// # Errors
    /// `InvalidChoreography` if either lock is non-positive or the
    /// counterparty expiry is not strictly earlier than the initiator's.
    pub fn new(now: DateTime<Utc>, config: ChoreographyConfig) -> Result<Self> {
        if config.initiator_lock_secs <= 0 || config.counterparty_lock_secs <= 0 {
            return Err(SwapError::InvalidChoreography {
                reason: format!(
                    "lock durations must be positive, got {}s / {}s",
                    config.initiator_lock_secs, config.counterparty_lock_secs
                ),
            });
        }
        if config.counterparty_lock_secs >= config.initiator_lock_secs {
            return Err(SwapError::InvalidChoreography {
                reason: format!(
                    "counterparty lock ({}s) must expire strictly before initiator lock ({}s)",
                    config.counterparty_lock_secs, config.initiator_lock_secs
                ),
            });
        }
        Ok(Self {
            initiator_expiry: Timelock(now + Duration::seconds(config.initiator_lock_secs)),
            counterparty_expiry: Timelock(now + Duration::seconds(config.counterparty_lock_secs)),
        })
    }
}
