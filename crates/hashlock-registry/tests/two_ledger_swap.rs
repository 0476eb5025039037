//! End-to-end two-ledger atomic swap scenarios.
//!
//! Two independent registry instances, one per ledger, coupled only by a
//! shared hash commitment and by the secret propagating through the event
//! stream. These tests exercise the full protocol choreography: the happy
//! path where both parties end up with the other's tokens, and the timeout
//! path where both sides reclaim their funds.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use hashlock_indexer::SwapProjection;
use hashlock_ledger::{FungibleLedger, SharedLedger};
use hashlock_registry::{ChoreographyConfig, SwapRegistry, TimelockPlan};
use hashlock_types::{
    AccountId, Clock, ManualClock, Secret, SwapError, SwapStatus, Timelock, TokenId,
};
use rust_decimal::Decimal;

const ALICE: AccountId = AccountId([0xa1; 20]);
const BOB: AccountId = AccountId([0xb0; 20]);
const INITIAL_BALANCE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const SWAP_AMOUNT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

fn t0() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// One hosting ledger: a registry plus the fungible token native to it.
struct LedgerSide {
    registry: SwapRegistry,
    ledger: SharedLedger,
    token: TokenId,
}

impl LedgerSide {
    fn new(clock: Arc<ManualClock>, symbol: &str, escrow: AccountId, funded: AccountId) -> Self {
        let token = TokenId::new(symbol);
        let ledger = FungibleLedger::new(token.clone(), escrow).into_shared();
        ledger.mint(funded, INITIAL_BALANCE);

        let mut registry = SwapRegistry::new(clock);
        registry.register_token(token.clone(), Box::new(ledger.clone()));
        Self {
            registry,
            ledger,
            token,
        }
    }

    fn escrow_balance(&self) -> Decimal {
        self.ledger.balance_of(self.ledger.escrow_account())
    }
}

fn two_sides(clock: &Arc<ManualClock>) -> (LedgerSide, LedgerSide) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    // Alice's token lives on ledger A, Bob's on ledger B. Each side's
    // escrow custody is a distinct account on its own ledger.
    let side_a = LedgerSide::new(clock.clone(), "ALICE", AccountId([0xea; 20]), ALICE);
    let side_b = LedgerSide::new(clock.clone(), "BOB", AccountId([0xeb; 20]), BOB);
    (side_a, side_b)
}

#[test]
fn happy_path_both_parties_swap_tokens() {
    let clock = Arc::new(ManualClock::new(t0()));
    let (mut side_a, mut side_b) = two_sides(&clock);

    // Alice holds the secret. Her escrow (claimed second, by Bob) gets the
    // later expiry; Bob's escrow (claimed first, by Alice) the earlier one.
    let secret = Secret::random();
    let hashlock = secret.commit();
    let plan = TimelockPlan::new(clock.now(), ChoreographyConfig::default()).unwrap();

    // Step 1: Alice locks 5 ALICE for Bob on ledger A.
    side_a.ledger.approve(ALICE, SWAP_AMOUNT);
    let a2b = side_a
        .registry
        .create(ALICE, BOB, &side_a.token, SWAP_AMOUNT, hashlock, plan.initiator_expiry)
        .unwrap();
    assert_eq!(side_a.ledger.balance_of(ALICE), INITIAL_BALANCE - SWAP_AMOUNT);
    assert_eq!(side_a.escrow_balance(), SWAP_AMOUNT);

    // Step 2: Bob mirrors with 5 BOB for Alice on ledger B, same hashlock,
    // strictly earlier expiry.
    side_b.ledger.approve(BOB, SWAP_AMOUNT);
    let b2a = side_b
        .registry
        .create(BOB, ALICE, &side_b.token, SWAP_AMOUNT, hashlock, plan.counterparty_expiry)
        .unwrap();
    assert_eq!(side_b.ledger.balance_of(BOB), INITIAL_BALANCE - SWAP_AMOUNT);

    // Step 3: Alice withdraws Bob's escrow, revealing the secret.
    side_b.registry.withdraw(ALICE, b2a, secret).unwrap();
    assert_eq!(side_b.ledger.balance_of(ALICE), SWAP_AMOUNT);
    assert_eq!(side_b.escrow_balance(), Decimal::ZERO);

    // Step 4: Bob learns the secret from ledger B's event stream, not from
    // Alice — the projection is his only channel.
    let mut projection = SwapProjection::new();
    projection.apply_all(&side_b.registry.drain_events());
    assert_eq!(projection.status(&b2a), Some(SwapStatus::Completed));
    let learned = projection.secret_for(&hashlock).unwrap();
    assert_eq!(learned, secret);

    // Step 5: Bob claims Alice's escrow with the learned secret.
    side_a.registry.withdraw(BOB, a2b, learned).unwrap();

    // Both parties hold the other's 5 units; both custodies are empty.
    assert_eq!(side_a.ledger.balance_of(BOB), SWAP_AMOUNT);
    assert_eq!(side_b.ledger.balance_of(ALICE), SWAP_AMOUNT);
    assert_eq!(side_a.escrow_balance(), Decimal::ZERO);
    assert_eq!(side_b.escrow_balance(), Decimal::ZERO);

    // Terminal records stay queryable with consistent flags.
    let rec_a = side_a.registry.get_record(&a2b).unwrap();
    let rec_b = side_b.registry.get_record(&b2a).unwrap();
    for rec in [rec_a, rec_b] {
        assert!(rec.withdrawn && !rec.refunded);
        assert_eq!(rec.preimage, Some(secret));
    }
}

#[test]
fn timeout_path_both_sides_refund() {
    let clock = Arc::new(ManualClock::new(t0()));
    let (mut side_a, mut side_b) = two_sides(&clock);

    let hashlock = Secret::random().commit();
    let expiry = Timelock(t0() + Duration::seconds(5));

    side_a.ledger.approve(ALICE, SWAP_AMOUNT);
    side_b.ledger.approve(BOB, SWAP_AMOUNT);
    let a2b = side_a
        .registry
        .create(ALICE, BOB, &side_a.token, SWAP_AMOUNT, hashlock, expiry)
        .unwrap();
    let b2a = side_b
        .registry
        .create(BOB, ALICE, &side_b.token, SWAP_AMOUNT, hashlock, expiry)
        .unwrap();

    // Nobody withdraws; the expiry passes on both ledgers.
    clock.advance(Duration::seconds(5));

    side_a.registry.refund(ALICE, a2b).unwrap();
    side_b.registry.refund(BOB, b2a).unwrap();

    // Original balances restored, custody empty on both sides.
    assert_eq!(side_a.ledger.balance_of(ALICE), INITIAL_BALANCE);
    assert_eq!(side_b.ledger.balance_of(BOB), INITIAL_BALANCE);
    assert_eq!(side_a.escrow_balance(), Decimal::ZERO);
    assert_eq!(side_b.escrow_balance(), Decimal::ZERO);

    // An indexer over both streams reports both sides refunded.
    let mut projection = SwapProjection::new();
    projection.apply_all(&side_a.registry.drain_events());
    projection.apply_all(&side_b.registry.drain_events());
    assert_eq!(projection.status(&a2b), Some(SwapStatus::Refunded));
    assert_eq!(projection.status(&b2a), Some(SwapStatus::Refunded));
    assert_eq!(projection.secret_for(&hashlock), None);
}

#[test]
fn cross_side_callers_are_rejected() {
    let clock = Arc::new(ManualClock::new(t0()));
    let (mut side_a, _) = two_sides(&clock);

    let secret = Secret::random();
    side_a.ledger.approve(ALICE, SWAP_AMOUNT);
    let a2b = side_a
        .registry
        .create(
            ALICE,
            BOB,
            &side_a.token,
            SWAP_AMOUNT,
            secret.commit(),
            Timelock(t0() + Duration::seconds(10)),
        )
        .unwrap();

    // Alice funded this escrow; she may not claim it even with the secret.
    let err = side_a.registry.withdraw(ALICE, a2b, secret).unwrap_err();
    assert!(matches!(err, SwapError::NotReceiver(_)));

    // Bob is the receiver, not the funder; he may not force a refund.
    clock.advance(Duration::seconds(10));
    let err = side_a.registry.refund(BOB, a2b).unwrap_err();
    assert!(matches!(err, SwapError::NotSender(_)));

    // The escrow is still intact for the rightful refund.
    side_a.registry.refund(ALICE, a2b).unwrap();
    assert_eq!(side_a.ledger.balance_of(ALICE), INITIAL_BALANCE);
}

#[test]
fn same_parameters_on_both_ledgers_do_not_collide() {
    // The swap id binds the token handle, so mirrored escrows with the same
    // hashlock, amount and expiry still get distinct ids.
    let clock = Arc::new(ManualClock::new(t0()));
    let (mut side_a, mut side_b) = two_sides(&clock);

    let hashlock = Secret::random().commit();
    let expiry = Timelock(t0() + Duration::seconds(10));

    side_a.ledger.approve(ALICE, SWAP_AMOUNT);
    side_b.ledger.mint(ALICE, SWAP_AMOUNT);
    side_b.ledger.approve(ALICE, SWAP_AMOUNT);

    let on_a = side_a
        .registry
        .create(ALICE, BOB, &side_a.token, SWAP_AMOUNT, hashlock, expiry)
        .unwrap();
    let on_b = side_b
        .registry
        .create(ALICE, BOB, &side_b.token, SWAP_AMOUNT, hashlock, expiry)
        .unwrap();

    assert_ne!(on_a, on_b);
}
