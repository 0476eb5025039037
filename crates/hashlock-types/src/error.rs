//! Error types for the Hashlock escrow registry.
//!
//! All errors use the `HL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Creation guard errors
//! - 2xx: Lookup / authorization errors
//! - 3xx: Settlement-state errors
//! - 4xx: Token transfer errors
//! - 5xx: Choreography errors
//!
//! Every variant is a distinct, non-retryable guard failure detected before
//! any mutation. None of them are used for control flow; a caller that sees
//! one must correct the violated precondition and resubmit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{SwapId, Timelock, TokenId};

/// Central error enum for all Hashlock operations.
#[derive(Debug, Error)]
pub enum SwapError {
    // =================================================================
    // Creation Guard Errors (1xx)
    // =================================================================
    /// Zero or negative escrow amounts are rejected.
    #[error("HL_ERR_100: Invalid amount: {amount} (must be > 0)")]
    InvalidAmount { amount: Decimal },

    /// Creation with an expiry not strictly after current ledger time.
    #[error("HL_ERR_101: Timelock not in the future: {timelock} (now {now})")]
    TimelockNotFuture {
        timelock: Timelock,
        now: DateTime<Utc>,
    },

    /// Identical swap parameters already registered.
    #[error("HL_ERR_102: Swap already exists: {0}")]
    DuplicateSwap(SwapId),

    // =================================================================
    // Lookup / Authorization Errors (2xx)
    // =================================================================
    /// The referenced swap id has no record.
    #[error("HL_ERR_200: Swap not found: {0}")]
    SwapNotFound(SwapId),

    /// Only the intended receiver may withdraw.
    #[error("HL_ERR_201: Caller is not the receiver of swap {0}")]
    NotReceiver(SwapId),

    /// Only the original funder may reclaim.
    #[error("HL_ERR_202: Caller is not the sender of swap {0}")]
    NotSender(SwapId),

    // =================================================================
    // Settlement-State Errors (3xx)
    // =================================================================
    /// The escrow was already claimed by the receiver.
    #[error("HL_ERR_300: Swap already withdrawn: {0}")]
    AlreadyWithdrawn(SwapId),

    /// The escrow was already reclaimed by the sender.
    #[error("HL_ERR_301: Swap already refunded: {0}")]
    AlreadyRefunded(SwapId),

    /// Withdrawal attempted at or after the expiry instant.
    #[error("HL_ERR_302: Timelock expired: {timelock} (now {now})")]
    TimelockExpired {
        timelock: Timelock,
        now: DateTime<Utc>,
    },

    /// Refund attempted strictly before the expiry instant.
    #[error("HL_ERR_303: Timelock not yet passed: {timelock} (now {now})")]
    TimelockNotYetPassed {
        timelock: Timelock,
        now: DateTime<Utc>,
    },

    /// The presented secret does not hash to the stored commitment.
    #[error("HL_ERR_304: Presented secret does not match hashlock")]
    HashlockMismatch,

    // =================================================================
    // Token Transfer Errors (4xx)
    // =================================================================
    /// Transfer-in precondition failed: escrow allowance too small.
    #[error("HL_ERR_400: Insufficient allowance: need {needed}, approved {approved}")]
    AllowanceInsufficient { needed: Decimal, approved: Decimal },

    /// Transfer precondition failed: account balance too small.
    #[error("HL_ERR_401: Insufficient balance: need {needed}, have {available}")]
    BalanceInsufficient { needed: Decimal, available: Decimal },

    /// No transfer capability registered for this asset kind.
    #[error("HL_ERR_402: Unknown token: {0}")]
    UnknownToken(TokenId),

    // =================================================================
    // Choreography Errors (5xx)
    // =================================================================
    /// The two-sided timelock plan violates the ordering discipline.
    #[error("HL_ERR_500: Invalid choreography: {reason}")]
    InvalidChoreography { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SwapError>;
