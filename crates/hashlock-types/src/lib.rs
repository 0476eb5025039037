//! # hashlock-types
//!
//! Shared types and errors for the **Hashlock** atomic-swap escrow registry.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`SwapId`], [`AccountId`], [`TokenId`]
//! - **Commitment**: [`Secret`], [`Hashlock`] (SHA-256 hash commitment)
//! - **Swap model**: [`SwapRecord`], [`SwapStatus`]
//! - **Events**: [`SwapEvent`] — the surface consumed by indexers and UIs
//! - **Time**: [`Timelock`], the [`Clock`] seam with [`SystemClock`] and
//!   [`ManualClock`]
//! - **Token interface**: [`TokenTransfer`], the collaborator that moves
//!   the underlying asset
//! - **Errors**: [`SwapError`] with `HL_ERR_` prefix codes

pub mod clock;
pub mod error;
pub mod event;
pub mod hashlock;
pub mod ids;
pub mod swap;
pub mod token;

// Re-export all primary types at crate root for ergonomic imports:
//   use hashlock_types::{SwapId, SwapRecord, SwapEvent, ...};

pub use clock::*;
pub use error::*;
pub use event::*;
pub use hashlock::*;
pub use ids::*;
pub use swap::*;
pub use token::*;
