//! # hashlock-ledger
//!
//! The **Token Transfer Collaborator**: an in-memory fungible-token ledger
//! with standard allowance/balance semantics.
//!
//! One [`FungibleLedger`] exists per (asset kind, escrow custody) pair. The
//! registry moves funds exclusively through the
//! [`hashlock_types::TokenTransfer`] capability; owners move their own
//! funds with [`FungibleLedger::transfer`] and authorize escrow pulls with
//! [`FungibleLedger::approve`].
//!
//! All mutations are atomic: either the full operation succeeds or the
//! ledger is unchanged.

pub mod fungible;

pub use fungible::{FungibleLedger, SharedLedger};
