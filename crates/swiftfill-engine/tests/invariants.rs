//! Integration tests: engine-wide invariants across valid histories.
//!
//! Custody conservation, bid monotonicity, single-auction-per-digest,
//! penalty bounds, settlement completeness, slow-beats-fast closure, and
//! single fast-fill redemption.

mod common;

use common::*;
use swiftfill_engine::assess;
use swiftfill_settlement::MessageBus;
use swiftfill_types::{AuctionStatus, BidOutcome, SwiftfillError};

/// Custody attributable to an active auction never deviates from
/// `amount + security_deposit`, no matter how many times the bid improves.
#[test]
fn custody_conserved_across_improvements() {
    let mut fx = Fixture::new();
    let raw = fx.attest_order(&fx.order(), 0);
    let digest = fx.digest_of(&raw);

    fx.engine
        .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 900_000)
        .unwrap();
    assert_eq!(fx.ledger.balance_of(engine_addr()), STAKE);

    let bidders = [bob(), carol(), alice(), bob(), carol()];
    for (round, bidder) in bidders.into_iter().enumerate() {
        let fee_bid = 800_000 - (round as u128) * 100_000;
        fx.engine
            .improve_bid(&mut fx.ledger, env(101), bidder, digest, fee_bid)
            .unwrap();
        assert_eq!(
            fx.ledger.balance_of(engine_addr()),
            STAKE,
            "custody drifted after improvement round {round}"
        );
    }
    // Supply is also conserved: improvements only shuffle stakes around.
    assert_eq!(fx.ledger.total_supply(), 3 * STAKE);
}

/// `bid_price` strictly decreases; everything fixed at the initial bid
/// stays fixed.
#[test]
fn bids_monotone_and_initial_fields_frozen() {
    let mut fx = Fixture::new();
    let raw = fx.attest_order(&fx.order(), 0);
    let digest = fx.digest_of(&raw);

    fx.engine
        .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 900_000)
        .unwrap();
    let opened = *fx.engine.auction(&digest).unwrap();

    let mut last_bid = opened.bid_price;
    for (bidder, fee_bid) in [(bob(), 700_000u128), (carol(), 600_000), (bob(), 100_000)] {
        fx.engine
            .improve_bid(&mut fx.ledger, env(102), bidder, digest, fee_bid)
            .unwrap();
        let auction = fx.engine.auction(&digest).unwrap();
        assert!(auction.bid_price < last_bid);
        last_bid = auction.bid_price;

        assert_eq!(auction.start_block, opened.start_block);
        assert_eq!(auction.initial_bidder, opened.initial_bidder);
        assert_eq!(auction.amount, opened.amount);
        assert_eq!(auction.security_deposit, opened.security_deposit);
        assert_eq!(auction.highest_bidder, bidder);
    }

    // A failed improvement changes nothing.
    let before = *fx.engine.auction(&digest).unwrap();
    let err = fx
        .engine
        .improve_bid(&mut fx.ledger, env(102), carol(), digest, 100_000)
        .unwrap_err();
    assert!(matches!(err, SwiftfillError::OfferPriceNotImproved { .. }));
    assert_eq!(*fx.engine.auction(&digest).unwrap(), before);
}

/// At most one record per digest, across any sequence of initial bids.
#[test]
fn one_auction_per_digest() {
    let mut fx = Fixture::new();
    let raw = fx.attest_order(&fx.order(), 0);
    let digest = fx.digest_of(&raw);

    fx.engine
        .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 600_000)
        .unwrap();
    let start_block = fx.engine.auction(&digest).unwrap().start_block;

    // Every later initial bid lands on the same record.
    for (bidder, fee_bid) in [(bob(), 500_000u128), (carol(), 450_000)] {
        let outcome = fx
            .engine
            .place_initial_bid(&fx.bus, &mut fx.ledger, env(101), bidder, &raw, fee_bid)
            .unwrap();
        assert!(matches!(outcome, BidOutcome::Improved(_)));
    }
    let auction = fx.engine.auction(&digest).unwrap();
    assert_eq!(auction.start_block, start_block);
    assert_eq!(auction.initial_bidder, alice());
    assert_eq!(auction.bid_price, 450_000);
}

/// Penalty bound, monotonicity, and the window edges, over the whole curve.
#[test]
fn penalty_bounded_and_monotone() {
    let params = params();
    let deposit = MAX_FEE;
    let penalty_free = params.duration + params.grace_period;

    let mut last_total = 0u128;
    for elapsed in 0..=penalty_free + params.penalty_blocks + 5 {
        let split = assess(&params, deposit, elapsed);
        let total = split.penalty + split.user_reward;
        assert!(total <= deposit, "elapsed {elapsed}");
        assert!(total >= last_total, "not monotone at {elapsed}");
        last_total = total;

        if elapsed <= penalty_free {
            assert_eq!(total, 0, "penalty inside the free window at {elapsed}");
        }
        if elapsed >= penalty_free + params.penalty_blocks {
            assert_eq!(total, deposit, "ramp incomplete at {elapsed}");
        }
    }
}

/// Everything the engine disburses on fast execution adds back up to
/// `amount + security_deposit`, in every branch of the payout split.
#[test]
fn fast_execution_disburses_exactly_custody() {
    for (execute_block, executor) in [(103u64, bob()), (109, carol()), (120, carol())] {
        let mut fx = Fixture::new();
        let raw = fx.attest_order(&fx.order(), 0);
        let digest = fx.digest_of(&raw);

        fx.engine
            .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 500_000)
            .unwrap();
        fx.engine
            .improve_bid(&mut fx.ledger, env(101), bob(), digest, 400_000)
            .unwrap();

        let supply_before = fx.ledger.total_supply();
        let execution = fx
            .engine
            .execute_fast_order(
                &mut fx.bus,
                &mut fx.rail,
                &mut fx.ledger,
                env(execute_block),
                executor,
                &raw,
            )
            .unwrap();

        // Custody drained to zero...
        assert_eq!(
            fx.ledger.balance_of(engine_addr()),
            0,
            "residual custody at block {execute_block}"
        );
        // ...and the only supply change is the burn toward the destination.
        assert_eq!(
            fx.ledger.total_supply(),
            supply_before - execution.user_amount,
            "supply leak at block {execute_block}"
        );
        assert_eq!(fx.rail.outbound()[0].amount, execution.user_amount);
    }
}

/// Once the canonical transfer settles a bare digest, nothing reopens it.
#[test]
fn slow_settlement_closes_digest_forever() {
    let mut fx = Fixture::new();
    let order = fx.order();
    let raw = fx.attest_order(&order, 0);
    let digest = fx.digest_of(&raw);
    let attested = fx.stage_slow(&order, 100_000);

    fx.engine
        .execute_slow_and_reconcile(
            &mut fx.bus,
            &mut fx.rail,
            &mut fx.ledger,
            env(100),
            carol(),
            &raw,
            &attested,
        )
        .unwrap();
    assert_eq!(
        fx.engine.auction(&digest).unwrap().status,
        AuctionStatus::Settled
    );

    for block in [100, 101, 5_000] {
        let err = fx
            .engine
            .place_initial_bid(&fx.bus, &mut fx.ledger, env(block), alice(), &raw, 500_000)
            .unwrap_err();
        assert!(matches!(err, SwiftfillError::AuctionNotActive(_)));
        assert_eq!(fx.ledger.balance_of(alice()), STAKE);
    }
}

/// A fast fill pays out exactly once, whoever asks and however often.
#[test]
fn fast_fill_redeems_exactly_once() {
    let mut fx = Fixture::new();
    let raw = fx.attest_order(&fx.local_order(), 0);

    fx.engine
        .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 500_000)
        .unwrap();
    fx.engine
        .execute_fast_order(
            &mut fx.bus,
            &mut fx.rail,
            &mut fx.ledger,
            env(103),
            alice(),
            &raw,
        )
        .unwrap();

    let fill_raw = fx.bus.last_published().unwrap().to_vec();
    let fill_digest = fx.bus.verify(&fill_raw).unwrap().digest;
    let fast_fill = fx
        .engine
        .redeem_fast_fill(&fx.bus, &mut fx.ledger, local_router(), &fill_raw)
        .unwrap();
    let router_balance = fx.ledger.balance_of(local_router());
    assert_eq!(router_balance, fast_fill.fill_amount);
    assert!(fx.engine.fast_fill_redeemed(&fill_digest));

    for _ in 0..3 {
        let err = fx
            .engine
            .redeem_fast_fill(&fx.bus, &mut fx.ledger, local_router(), &fill_raw)
            .unwrap_err();
        assert!(matches!(err, SwiftfillError::FastFillAlreadyRedeemed(_)));
        assert_eq!(fx.ledger.balance_of(local_router()), router_balance);
    }
}

/// The settled terminal record survives a config replacement; persisted
/// regions are independent.
#[test]
fn config_replacement_leaves_auctions_intact() {
    let mut fx = Fixture::new();
    let raw = fx.attest_order(&fx.order(), 0);
    let digest = fx.digest_of(&raw);

    fx.engine
        .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 500_000)
        .unwrap();

    let mut longer = params();
    longer.duration = 10;
    longer.grace_period = 20;
    fx.engine.set_config(longer).unwrap();

    let auction = fx.engine.auction(&digest).unwrap();
    assert_eq!(auction.status, AuctionStatus::Active);
    assert_eq!(auction.bid_price, 500_000);

    // The fresh window applies to the live auction: block 105 now improves.
    fx.engine
        .improve_bid(&mut fx.ledger, env(105), bob(), digest, 400_000)
        .unwrap();
}

/// A two-engine sanity check: the same history applied to two engines
/// yields identical records and balances.
#[test]
fn identical_histories_identical_state() {
    fn run() -> (Fixture, u128) {
        let mut fx = Fixture::new();
        let raw = fx.attest_order(&fx.order(), 0);
        let digest = fx.digest_of(&raw);
        fx.engine
            .place_initial_bid(&fx.bus, &mut fx.ledger, env(100), alice(), &raw, 500_000)
            .unwrap();
        fx.engine
            .improve_bid(&mut fx.ledger, env(101), bob(), digest, 400_000)
            .unwrap();
        fx.engine
            .execute_fast_order(
                &mut fx.bus,
                &mut fx.rail,
                &mut fx.ledger,
                env(109),
                carol(),
                &raw,
            )
            .unwrap();
        let carol_balance = fx.ledger.balance_of(carol());
        (fx, carol_balance)
    }

    let (fx_a, carol_a) = run();
    let (fx_b, carol_b) = run();
    assert_eq!(carol_a, carol_b);
    assert_eq!(fx_a.rail.outbound()[0].amount, fx_b.rail.outbound()[0].amount);
    assert_eq!(fx_a.ledger.balance_of(bob()), fx_b.ledger.balance_of(bob()));
}
