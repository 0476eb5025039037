//! The token transfer capability consumed by the registry.
//!
//! One implementation exists per supported asset kind; the registry holds
//! one handle per [`crate::TokenId`] and treats every call as fallible with
//! no partial effect. A failed transfer aborts the enclosing operation with
//! the record untouched.

use rust_decimal::Decimal;

use crate::{AccountId, Result};

/// Moves the underlying asset between accounts and the escrow custody the
/// handle is bound to. The registry is the sole caller of the mutating
/// methods for records it governs.
pub trait TokenTransfer: Send {
    /// Pull `amount` from `from` into escrow custody. Requires a
    /// pre-established allowance of at least `amount` from `from` to the
    /// escrow.
    ///
    /// # Errors
    /// `AllowanceInsufficient` and `BalanceInsufficient` are distinct,
    /// user-actionable failures.
    fn transfer_in(&mut self, from: AccountId, amount: Decimal) -> Result<()>;

    /// Move escrowed funds to `to`. Fatal to the enclosing operation on
    /// failure; the implementation must not partially commit.
    fn transfer_out(&mut self, to: AccountId, amount: Decimal) -> Result<()>;

    /// Read-only balance query. Used by external observers and tests only,
    /// never by the registry's guard logic.
    fn balance_of(&self, account: AccountId) -> Decimal;
}
