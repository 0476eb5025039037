//! In-memory fungible-token ledger bound to one escrow custody account.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use hashlock_types::{AccountId, Result, SwapError, TokenId, TokenTransfer};
use rust_decimal::Decimal;
use tracing::debug;

/// Balances and escrow allowances for a single asset kind.
///
/// The ledger is the source of truth for who holds the asset. The escrow
/// custody account is ordinary balance state; only the registry (through
/// the [`TokenTransfer`] capability) moves funds in or out of it.
#[derive(Debug)]
pub struct FungibleLedger {
    token: TokenId,
    /// Custody account the [`TokenTransfer`] handle is bound to.
    escrow: AccountId,
    balances: HashMap<AccountId, Decimal>,
    /// Per-owner allowance towards the escrow account.
    allowances: HashMap<AccountId, Decimal>,
}

impl FungibleLedger {
    /// Create an empty ledger for `token` with the given escrow custody
    /// account.
    #[must_use]
    pub fn new(token: TokenId, escrow: AccountId) -> Self {
        Self {
            token,
            escrow,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &TokenId {
        &self.token
    }

    #[must_use]
    pub fn escrow_account(&self) -> AccountId {
        self.escrow
    }

    /// Issue new units to `to` (increases total supply).
    pub fn mint(&mut self, to: AccountId, amount: Decimal) {
        *self.balances.entry(to).or_default() += amount;
    }

    /// Authorize the escrow to pull up to `amount` from `owner`.
    /// Overwrites any previous allowance, ERC20-style.
    pub fn approve(&mut self, owner: AccountId, amount: Decimal) {
        self.allowances.insert(owner, amount);
        debug!(token = %self.token, owner = %owner.short(), %amount, "allowance set");
    }

    /// Remaining allowance from `owner` towards the escrow.
    #[must_use]
    pub fn allowance(&self, owner: AccountId) -> Decimal {
        self.allowances.get(&owner).copied().unwrap_or_default()
    }

    /// Owner-initiated transfer between ordinary accounts.
    ///
    /// # Errors
    /// Returns `BalanceInsufficient` if `from` holds less than `amount`.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        self.debit(from, amount)?;
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    /// Total issued supply (sum over all accounts, escrow included).
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Wrap into a cloneable handle usable both as the registry's
    /// capability and as the test/host's view of the same ledger.
    #[must_use]
    pub fn into_shared(self) -> SharedLedger {
        SharedLedger {
            inner: Arc::new(Mutex::new(self)),
        }
    }

    fn debit(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        let balance = self.balances.entry(from).or_default();
        if *balance < amount {
            return Err(SwapError::BalanceInsufficient {
                needed: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(())
    }
}

impl TokenTransfer for FungibleLedger {
    fn transfer_in(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        let approved = self.allowance(from);
        if approved < amount {
            return Err(SwapError::AllowanceInsufficient {
                needed: amount,
                approved,
            });
        }
        self.debit(from, amount)?;
        self.allowances.insert(from, approved - amount);
        let escrow = self.escrow;
        *self.balances.entry(escrow).or_default() += amount;
        debug!(token = %self.token, from = %from.short(), %amount, "transfer in");
        Ok(())
    }

    fn transfer_out(&mut self, to: AccountId, amount: Decimal) -> Result<()> {
        let escrow = self.escrow;
        self.debit(escrow, amount)?;
        *self.balances.entry(to).or_default() += amount;
        debug!(token = %self.token, to = %to.short(), %amount, "transfer out");
        Ok(())
    }

    fn balance_of(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// SharedLedger
// ---------------------------------------------------------------------------

/// Cloneable handle over one [`FungibleLedger`].
///
/// The registry owns one clone as its transfer capability; the host keeps
/// another to mint, approve and observe balances on the same ledger.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<FungibleLedger>>,
}

impl SharedLedger {
    pub fn mint(&self, to: AccountId, amount: Decimal) {
        self.lock().mint(to, amount);
    }

    pub fn approve(&self, owner: AccountId, amount: Decimal) {
        self.lock().approve(owner, amount);
    }

    #[must_use]
    pub fn allowance(&self, owner: AccountId) -> Decimal {
        self.lock().allowance(owner)
    }

    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Decimal {
        self.lock().balance_of(account)
    }

    #[must_use]
    pub fn escrow_account(&self) -> AccountId {
        self.lock().escrow_account()
    }

    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.lock().total_supply()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FungibleLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenTransfer for SharedLedger {
    fn transfer_in(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        self.lock().transfer_in(from, amount)
    }

    fn transfer_out(&mut self, to: AccountId, amount: Decimal) -> Result<()> {
        self.lock().transfer_out(to, amount)
    }

    fn balance_of(&self, account: AccountId) -> Decimal {
        self.lock().balance_of(account)
    }
}
