//! # hashlock-registry
//!
//! The **Swap Registry**: the escrow state machine of a hashed-timelock
//! atomic swap, one instance per hosting ledger.
//!
//! ## Architecture
//!
//! A two-sided swap is two independent registry entries on two ledgers,
//! linked only by sharing the same hash commitment. No operation spans
//! both ledgers; atomicity is an emergent protocol property:
//!
//! 1. **[`SwapRegistry`]**: owns all swap records and their invariants;
//!    validates the guard chain of every transition, moves funds through
//!    the registered [`hashlock_types::TokenTransfer`] capabilities, and
//!    emits [`hashlock_types::SwapEvent`]s.
//! 2. **[`choreography`]**: the timelock ordering discipline callers must
//!    respect when setting up the two sides — the registry only observes
//!    one side and cannot enforce it unilaterally.
//!
//! ## Operation flow
//!
//! ```text
//! caller → guards (all pure, in order) → token transfer → record mutation
//!        → event emission
//! ```
//!
//! Every guard failure aborts the whole operation with zero side effects.

pub mod choreography;
pub mod registry;

pub use choreography::{ChoreographyConfig, TimelockPlan};
pub use registry::SwapRegistry;
