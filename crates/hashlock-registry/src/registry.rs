//! The swap registry: records, guard chains, and the three transitions.
//!
//! The hosting ledger serializes all calls and aborts atomically, so the
//! registry needs no internal locking: every guard is evaluated against the
//! latest committed state, and no mutation happens before the full guard
//! chain and the token transfer have succeeded.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use hashlock_types::{
    AccountId, Clock, Hashlock, Result, Secret, SwapError, SwapEvent, SwapId, SwapRecord,
    Timelock, TokenId, TokenTransfer,
};
use rust_decimal::Decimal;
use tracing::info;

/// One escrow registry instance, bound to one hosting ledger's clock.
///
/// Holds every swap record ever created (records are never deleted — the
/// terminal record remains queryable as an audit trail), one
/// [`TokenTransfer`] capability per supported asset kind, and the log of
/// emitted events awaiting an indexing consumer.
pub struct SwapRegistry {
    records: HashMap<SwapId, SwapRecord>,
    tokens: HashMap<TokenId, Box<dyn TokenTransfer>>,
    clock: Arc<dyn Clock>,
    events: Vec<SwapEvent>,
}

impl SwapRegistry {
    /// Create an empty registry reading time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: HashMap::new(),
            tokens: HashMap::new(),
            clock,
            events: Vec::new(),
        }
    }

    /// Register the transfer capability for one asset kind. Swaps can only
    /// be created in tokens registered here.
    pub fn register_token(&mut self, token: TokenId, handle: Box<dyn TokenTransfer>) {
        self.tokens.insert(token, handle);
    }

    /// Create and fund a new escrow. Returns the deterministic swap id.
    ///
    /// Guard chain, each a distinct fatal condition, evaluated in order
    /// before any mutation:
    /// 1. `amount > 0`
    /// 2. the token has a registered transfer capability
    /// 3. `timelock` is strictly later than current ledger time
    /// 4. no record exists for the derived id (duplicate submission)
    /// 5. the transfer-in succeeds (allowance and balance, reported as
    ///    distinct failures by the collaborator)
    ///
    /// Funds move from `caller` into escrow custody at this moment; the
    /// record is only inserted after the transfer has succeeded.
    pub fn create(
        &mut self,
        caller: AccountId,
        receiver: AccountId,
        token: &TokenId,
        amount: Decimal,
        hashlock: Hashlock,
        timelock: Timelock,
    ) -> Result<SwapId> {
        if amount <= Decimal::ZERO {
            return Err(SwapError::InvalidAmount { amount });
        }
        if !self.tokens.contains_key(token) {
            return Err(SwapError::UnknownToken(token.clone()));
        }
        let now = self.clock.now();
        if !timelock.is_future(now) {
            return Err(SwapError::TimelockNotFuture { timelock, now });
        }
        let id = SwapId::derive(caller, receiver, token, amount, hashlock, timelock);
        if self.records.contains_key(&id) {
            return Err(SwapError::DuplicateSwap(id));
        }

        // Last fallible step: pull the funds into custody. A failure here
        // leaves the registry untouched.
        self.token_handle(token)?.transfer_in(caller, amount)?;

        self.records.insert(
            id,
            SwapRecord {
                id,
                sender: caller,
                receiver,
                token: token.clone(),
                amount,
                hashlock,
                timelock,
                withdrawn: false,
                refunded: false,
                preimage: None,
                created_at: now,
            },
        );
        self.events.push(SwapEvent::Created {
            id,
            sender: caller,
            receiver,
            token: token.clone(),
            amount,
            hashlock,
            timelock,
        });
        info!(%id, sender = %caller.short(), receiver = %receiver.short(),
              %token, %amount, %timelock, "swap created");
        Ok(id)
    }

    /// Claim an escrow by presenting the secret, strictly before expiry.
    ///
    /// Guard chain in order: record exists, caller is the receiver, not
    /// already withdrawn, not already refunded, claim window still open
    /// (`now < timelock`), and the secret hashes to the stored commitment.
    ///
    /// On success the secret is stored as the record's preimage and
    /// published in the withdrawal event — deliberately: any observer, in
    /// particular the original sender, can now claim the counterparty
    /// escrow that shares this hashlock.
    pub fn withdraw(&mut self, caller: AccountId, id: SwapId, secret: Secret) -> Result<()> {
        let record = self.records.get(&id).ok_or(SwapError::SwapNotFound(id))?;
        if caller != record.receiver {
            return Err(SwapError::NotReceiver(id));
        }
        if record.withdrawn {
            return Err(SwapError::AlreadyWithdrawn(id));
        }
        if record.refunded {
            return Err(SwapError::AlreadyRefunded(id));
        }
        let now = self.clock.now();
        let timelock = record.timelock;
        if timelock.expired_at(now) {
            return Err(SwapError::TimelockExpired { timelock, now });
        }
        if !record.hashlock.matches(&secret) {
            return Err(SwapError::HashlockMismatch);
        }

        let (token, amount, receiver) = (record.token.clone(), record.amount, record.receiver);
        self.token_handle(&token)?.transfer_out(receiver, amount)?;

        // Unreachable: existence was checked above and records are never
        // removed.
        let record = self.records.get_mut(&id).ok_or(SwapError::SwapNotFound(id))?;
        record.withdrawn = true;
        record.preimage = Some(secret);
        self.events.push(SwapEvent::Withdrawn { id, secret });
        info!(%id, receiver = %receiver.short(), %amount, "swap withdrawn, secret revealed");
        Ok(())
    }

    /// Reclaim an unclaimed escrow at or after expiry.
    ///
    /// Guard chain in order: record exists, caller is the original sender,
    /// not withdrawn, not already refunded, refund window open
    /// (`now >= timelock` — mutually exclusive by construction with the
    /// withdrawal window).
    pub fn refund(&mut self, caller: AccountId, id: SwapId) -> Result<()> {
        let record = self.records.get(&id).ok_or(SwapError::SwapNotFound(id))?;
        if caller != record.sender {
            return Err(SwapError::NotSender(id));
        }
        if record.withdrawn {
            return Err(SwapError::AlreadyWithdrawn(id));
        }
        if record.refunded {
            return Err(SwapError::AlreadyRefunded(id));
        }
        let now = self.clock.now();
        let timelock = record.timelock;
        if !timelock.expired_at(now) {
            return Err(SwapError::TimelockNotYetPassed { timelock, now });
        }

        let (token, amount, sender) = (record.token.clone(), record.amount, record.sender);
        self.token_handle(&token)?.transfer_out(sender, amount)?;

        let record = self.records.get_mut(&id).ok_or(SwapError::SwapNotFound(id))?;
        record.refunded = true;
        self.events.push(SwapEvent::Refunded { id });
        info!(%id, sender = %sender.short(), %amount, "swap refunded");
        Ok(())
    }

    /// Query surface: the full record, terminal or pending.
    #[must_use]
    pub fn get_record(&self, id: &SwapId) -> Option<&SwapRecord> {
        self.records.get(id)
    }

    /// Number of records ever created.
    #[must_use]
    pub fn swap_count(&self) -> usize {
        self.records.len()
    }

    /// Events emitted since the last drain, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SwapEvent] {
        &self.events
    }

    /// Hand the accumulated events to a consumer (indexer, UI feed).
    pub fn drain_events(&mut self) -> Vec<SwapEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current ledger time as this registry observes it.
    #[must_use]
    pub fn now(&self) -> chrono::DateTime<Utc> {
        self.clock.now()
    }

    fn token_handle(&mut self, token: &TokenId) -> Result<&mut (dyn TokenTransfer + 'static)> {
        self.tokens
            .get_mut(token)
            .map(|handle| handle.as_mut())
            .ok_or_else(|| SwapError::UnknownToken(token.clone()))
    }
}
