//! Shared fixture for the engine integration suites.
//!
//! One engine on chain 1 with routers registered for the source chain, a
//! remote target chain, and the local peer router; three funded relayers
//! (alice, bob, carol); and helpers to attest orders and stage canonical
//! transfers.

#![allow(dead_code)]

use swiftfill_engine::MatchingEngine;
use swiftfill_settlement::{MemoryBus, MemoryRail, MessageBus};
use swiftfill_types::{
    AuctionParameters, BlockEnv, Digest, TokenLedger, UniversalAddress,
};
use swiftfill_wire::FastMarketOrder;

pub const LOCAL_CHAIN: u16 = 1;
pub const SOURCE_CHAIN: u16 = 6;
pub const TARGET_CHAIN: u16 = 23;

pub const AMOUNT_IN: u128 = 50_000_000_000;
pub const MAX_FEE: u128 = 1_000_000;
pub const INIT_AUCTION_FEE: u128 = 100;
pub const SLOW_SEQUENCE: u64 = 88;

/// Every relayer starts with exactly one auction's stake.
pub const STAKE: u128 = AMOUNT_IN + MAX_FEE;

pub fn addr(tag: u8) -> UniversalAddress {
    UniversalAddress([tag; 32])
}

pub fn alice() -> UniversalAddress {
    addr(0xA1)
}

pub fn bob() -> UniversalAddress {
    addr(0xA2)
}

pub fn carol() -> UniversalAddress {
    addr(0xA3)
}

pub fn engine_addr() -> UniversalAddress {
    addr(0xEE)
}

pub fn fee_recipient() -> UniversalAddress {
    addr(0xFE)
}

pub fn source_router() -> UniversalAddress {
    addr(0x06)
}

pub fn target_router() -> UniversalAddress {
    addr(0x23)
}

pub fn local_router() -> UniversalAddress {
    addr(0x01)
}

pub fn params() -> AuctionParameters {
    AuctionParameters {
        user_penalty_reward_bps: 250_000,
        initial_penalty_bps: 250_000,
        duration: 2,
        grace_period: 5,
        penalty_blocks: 10,
    }
}

pub fn env(block: u64) -> BlockEnv {
    BlockEnv::at_block(block)
}

pub struct Fixture {
    pub engine: MatchingEngine,
    pub bus: MemoryBus,
    pub rail: MemoryRail,
    pub ledger: TokenLedger,
}

impl Fixture {
    pub fn new() -> Self {
        let mut engine =
            MatchingEngine::new(LOCAL_CHAIN, engine_addr(), fee_recipient(), params()).unwrap();
        engine.add_endpoint(SOURCE_CHAIN, source_router()).unwrap();
        engine.add_endpoint(TARGET_CHAIN, target_router()).unwrap();
        engine.add_endpoint(LOCAL_CHAIN, local_router()).unwrap();

        let mut ledger = TokenLedger::new();
        for relayer in [alice(), bob(), carol()] {
            ledger.mint(relayer, STAKE).unwrap();
        }

        Self {
            engine,
            bus: MemoryBus::new(LOCAL_CHAIN, engine_addr()),
            rail: MemoryRail::new(),
            ledger,
        }
    }

    /// An order destined for the remote target chain.
    pub fn order(&self) -> FastMarketOrder {
        FastMarketOrder {
            amount_in: AMOUNT_IN,
            min_amount_out: AMOUNT_IN - 2 * MAX_FEE,
            target_chain: TARGET_CHAIN,
            destination_domain: 3,
            redeemer: addr(0x30),
            sender: addr(0x31),
            refund_address: addr(0x32),
            slow_emitter: addr(0x33),
            slow_sequence: SLOW_SEQUENCE,
            max_fee: MAX_FEE,
            init_auction_fee: INIT_AUCTION_FEE,
            deadline: 0,
            redeemer_message: b"deliver".to_vec(),
        }
    }

    /// The same order, but destined for the engine's own chain.
    pub fn local_order(&self) -> FastMarketOrder {
        let mut order = self.order();
        order.target_chain = LOCAL_CHAIN;
        order
    }

    /// Attest an order as the source chain's router would emit it.
    pub fn attest_order(&self, order: &FastMarketOrder, sequence: u64) -> Vec<u8> {
        MemoryBus::attest_foreign(SOURCE_CHAIN, source_router(), sequence, &order.encode())
    }

    /// Digest the substrate assigns to a raw message.
    pub fn digest_of(&self, raw: &[u8]) -> Digest {
        self.bus.verify(raw).unwrap().digest
    }

    /// Stage the finalized canonical transfer paired with `order`, carrying
    /// `base_fee`, minting `amount_in` to the engine on redeem.
    pub fn stage_slow(&mut self, order: &FastMarketOrder, base_fee: u128) -> Vec<u8> {
        let response = swiftfill_wire::SlowOrderResponse { base_fee }.encode();
        self.rail.stage_inbound(
            SOURCE_CHAIN,
            order.slow_emitter,
            order.slow_sequence,
            order.amount_in,
            engine_addr(),
            response,
        )
    }
}
