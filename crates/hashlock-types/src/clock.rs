//! Ledger time: timelocks and the clock seam.
//!
//! Every guard in the registry compares against "current ledger time at
//! execution". The host ledger owns that clock, so the registry reads it
//! through the [`Clock`] trait: [`SystemClock`] in production,
//! [`ManualClock`] for deterministic boundary tests around the expiry
//! instant.

use std::fmt;
#[cfg(any(test, feature = "test-helpers"))]
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timelock
// ---------------------------------------------------------------------------

/// Absolute expiry timestamp of an escrow. Immutable after creation.
///
/// The unlock windows partition time exactly at this instant: withdrawal
/// requires strictly-before, refund requires at-or-after. Keep the strict
/// `<` / `>=` pair intact — it is what makes the two windows mutually
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Timelock(pub DateTime<Utc>);

impl Timelock {
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Expiry as microseconds since the UNIX epoch (id derivation input).
    #[must_use]
    pub fn timestamp_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }

    /// Strictly in the future of `now` — the creation guard.
    #[must_use]
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.0 > now
    }

    /// Whether the refund window is open: `now >= timelock`.
    #[must_use]
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.0
    }
}

impl fmt::Display for Timelock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of current ledger time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, the production clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Lets tests pin ledger time to the
/// exact expiry instant.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += by;
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn timelock_boundary_is_exclusive() {
        let lock = Timelock(t0());
        let tick = Duration::seconds(1);

        // One tick before expiry: claim window open, refund window shut.
        assert!(lock.is_future(t0() - tick));
        assert!(!lock.expired_at(t0() - tick));

        // At the exact expiry instant the windows flip together.
        assert!(!lock.is_future(t0()));
        assert!(lock.expired_at(t0()));
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(t0());
        assert_eq!(clock.now(), t0());
        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now(), t0() + Duration::seconds(5));
        clock.set(t0());
        assert_eq!(clock.now(), t0());
    }

    #[test]
    fn timelock_serde_roundtrip() {
        let lock = Timelock(t0());
        let json = serde_json::to_string(&lock).unwrap();
        let back: Timelock = serde_json::from_str(&json).unwrap();
        assert_eq!(lock, back);
    }
}
