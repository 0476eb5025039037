//! # hashlock-indexer
//!
//! Mirrors registry events into a queryable view, without registry read
//! access. A UI or counterparty process feeds it the event stream of one
//! (or both) registries and asks:
//!
//! - what is the status of swap `id` — `PENDING`, `COMPLETED`, `REFUNDED`?
//! - has the secret behind hashlock `h` been revealed yet, and what is it?
//!
//! The second question is the off-band propagation channel of the protocol:
//! the counterparty watches for the withdrawal on one ledger to learn the
//! secret that unlocks the paired escrow on the other.

pub mod projection;

pub use projection::{SwapProjection, SwapView};
