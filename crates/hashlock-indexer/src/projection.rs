//! The swap status projection built from the event stream.

use std::collections::HashMap;

use hashlock_types::{
    AccountId, Hashlock, Secret, SwapEvent, SwapId, SwapStatus, Timelock, TokenId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Queryable summary of one swap, reconstructed purely from events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapView {
    pub id: SwapId,
    pub sender: AccountId,
    pub receiver: AccountId,
    pub token: TokenId,
    pub amount: Decimal,
    pub hashlock: Hashlock,
    pub timelock: Timelock,
    pub status: SwapStatus,
    /// The secret, once the withdrawal event revealed it.
    pub secret: Option<Secret>,
}

/// Applies registry events in order and answers status queries.
///
/// One projection may consume the streams of several registries — views are
/// keyed by [`SwapId`], which is globally deterministic, and revealed
/// secrets are indexed by hashlock so the counterparty escrow's secret can
/// be looked up regardless of which ledger revealed it.
#[derive(Debug, Default)]
pub struct SwapProjection {
    views: HashMap<SwapId, SwapView>,
    revealed: HashMap<Hashlock, Secret>,
}

impl SwapProjection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the projection.
    ///
    /// Terminal events for unknown ids are tolerated and logged: an
    /// indexer may attach mid-stream and miss the creation event.
    pub fn apply(&mut self, event: &SwapEvent) {
        match event {
            SwapEvent::Created {
                id,
                sender,
                receiver,
                token,
                amount,
                hashlock,
                timelock,
            } => {
                self.views.insert(
                    *id,
                    SwapView {
                        id: *id,
                        sender: *sender,
                        receiver: *receiver,
                        token: token.clone(),
                        amount: *amount,
                        hashlock: *hashlock,
                        timelock: *timelock,
                        status: SwapStatus::Pending,
                        secret: None,
                    },
                );
                debug!(%id, "indexed swap creation");
            }
            SwapEvent::Withdrawn { id, secret } => {
                if let Some(view) = self.views.get_mut(id) {
                    view.status = SwapStatus::Completed;
                    view.secret = Some(*secret);
                    self.revealed.insert(view.hashlock, *secret);
                    debug!(%id, "indexed withdrawal, secret learned");
                } else {
                    warn!(%id, "withdrawal for unknown swap, creation event missed");
                }
            }
            SwapEvent::Refunded { id } => {
                if let Some(view) = self.views.get_mut(id) {
                    view.status = SwapStatus::Refunded;
                    debug!(%id, "indexed refund");
                } else {
                    warn!(%id, "refund for unknown swap, creation event missed");
                }
            }
        }
    }

    /// Fold a batch of events, oldest first.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a SwapEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Status of one swap, if its creation has been indexed.
    #[must_use]
    pub fn status(&self, id: &SwapId) -> Option<SwapStatus> {
        self.views.get(id).map(|view| view.status)
    }

    /// Full queryable view of one swap.
    #[must_use]
    pub fn view(&self, id: &SwapId) -> Option<&SwapView> {
        self.views.get(id)
    }

    /// The revealed secret behind a hashlock, once some withdrawal on any
    /// indexed ledger has disclosed it.
    #[must_use]
    pub fn secret_for(&self, hashlock: &Hashlock) -> Option<Secret> {
        self.revealed.get(hashlock).copied()
    }

    /// Number of swaps indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn created(id: SwapId, hashlock: Hashlock) -> SwapEvent {
        SwapEvent::Created {
            id,
            sender: AccountId([1u8; 20]),
            receiver: AccountId([2u8; 20]),
            token: TokenId::new("ALICE"),
            amount: Decimal::new(5, 0),
            hashlock,
            timelock: Timelock(Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(10)),
        }
    }

    #[test]
    fn creation_indexes_pending_view() {
        let mut projection = SwapProjection::new();
        let id = SwapId([1u8; 32]);
        let hashlock = Secret([7u8; 32]).commit();
        projection.apply(&created(id, hashlock));

        assert_eq!(projection.status(&id), Some(SwapStatus::Pending));
        let view = projection.view(&id).unwrap();
        assert_eq!(view.hashlock, hashlock);
        assert!(view.secret.is_none());
        assert_eq!(projection.len(), 1);
    }

    #[test]
    fn withdrawal_completes_and_reveals() {
        let mut projection = SwapProjection::new();
        let id = SwapId([1u8; 32]);
        let secret = Secret([7u8; 32]);
        let hashlock = secret.commit();

        projection.apply_all([
            &created(id, hashlock),
            &SwapEvent::Withdrawn { id, secret },
        ]);

        assert_eq!(projection.status(&id), Some(SwapStatus::Completed));
        assert_eq!(projection.secret_for(&hashlock), Some(secret));
    }

    #[test]
    fn refund_marks_refunded() {
        let mut projection = SwapProjection::new();
        let id = SwapId([1u8; 32]);
        let hashlock = Secret([7u8; 32]).commit();

        projection.apply(&created(id, hashlock));
        projection.apply(&SwapEvent::Refunded { id });

        assert_eq!(projection.status(&id), Some(SwapStatus::Refunded));
        assert_eq!(projection.secret_for(&hashlock), None);
    }

    #[test]
    fn unknown_swap_queries_return_none() {
        let projection = SwapProjection::new();
        assert!(projection.is_empty());
        assert_eq!(projection.status(&SwapId([9u8; 32])), None);
        assert_eq!(projection.secret_for(&Secret([9u8; 32]).commit()), None);
    }

    #[test]
    fn terminal_event_without_creation_is_tolerated() {
        let mut projection = SwapProjection::new();
        projection.apply(&SwapEvent::Withdrawn {
            id: SwapId([9u8; 32]),
            secret: Secret([7u8; 32]),
        });
        projection.apply(&SwapEvent::Refunded {
            id: SwapId([8u8; 32]),
        });
        assert!(projection.is_empty());
    }

    #[test]
    fn secret_propagates_across_ledgers_sharing_a_hashlock() {
        // Two swaps (two ledgers) under the same commitment: a withdrawal
        // on either side reveals the secret for both.
        let mut projection = SwapProjection::new();
        let secret = Secret([7u8; 32]);
        let hashlock = secret.commit();
        let side_a = SwapId([1u8; 32]);
        let side_b = SwapId([2u8; 32]);

        projection.apply(&created(side_a, hashlock));
        projection.apply(&created(side_b, hashlock));
        projection.apply(&SwapEvent::Withdrawn { id: side_b, secret });

        assert_eq!(projection.status(&side_a), Some(SwapStatus::Pending));
        assert_eq!(projection.status(&side_b), Some(SwapStatus::Completed));
        assert_eq!(projection.secret_for(&hashlock), Some(secret));
    }
}
