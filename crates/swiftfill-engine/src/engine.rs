//! The auction engine state machine.
//!
//! One digest, one auction, three actors to keep honest: the initial bidder
//! (paid gas to open, earns `init_auction_fee`), the highest bidder (fronts
//! liquidity, earns `bid_price`, posts the deposit), and the executor
//! (the winner in time, or a liquidator collecting the penalty). Every
//! entry point applies atomically: checks run first, funds are pulled
//! before state writes, disbursements follow them, and any error leaves
//! the engine untouched.

use swiftfill_settlement::{
    BurnMintRail, FastFillLedger, MessageBus, SettlementSink, VerifiedMessage,
};
use swiftfill_types::{
    Auction, AuctionParameters, AuctionStarted, AuctionStatus, BidOutcome, BlockEnv, Digest,
    NewBid, Result, SwiftfillError, TokenLedger, UniversalAddress,
};
use swiftfill_wire::{FastFill, FastMarketOrder, Fill, SlowOrderResponse};

use crate::{penalty, AuctionStore, EndpointRegistry};

/// Result of executing a fast order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastExecution {
    /// The auction that executed.
    pub digest: Digest,
    /// Sequence of the emitted settlement message.
    pub sequence: u64,
    /// Amount delivered toward the destination.
    pub user_amount: u128,
    /// Slash paid to the executor. Zero within the grace period.
    pub penalty: u128,
    /// Slash share added to the user amount. Zero within the grace period.
    pub user_reward: u128,
}

/// Result of reconciling the canonical transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowSettlement {
    /// The digest the transfer reconciled.
    pub digest: Digest,
    /// Protocol base fee carried by the slow transfer.
    pub base_fee: u128,
    /// Slash paid to the caller, when the auction was still active.
    pub penalty: u128,
    /// Slash share forwarded to the user, when the auction was still active.
    pub user_reward: u128,
    /// Sequence of the emitted settlement message, if this reconciliation
    /// forwarded funds itself.
    pub sequence: Option<u64>,
}

/// The deterministic settlement core.
///
/// Owns the four persistent regions — endpoint registry, auction config,
/// auction store, fast-fill ledger — plus its identity on the local chain.
/// External collaborators (the message bus, the burn-and-mint rail, the
/// token ledger) are passed per call.
#[derive(Debug)]
pub struct MatchingEngine {
    local_chain: u16,
    /// Custody account on the token ledger and fast-fill emitter address.
    address: UniversalAddress,
    fee_recipient: UniversalAddress,
    config: AuctionParameters,
    registry: EndpointRegistry,
    auctions: AuctionStore,
    fast_fills: FastFillLedger,
    sink: SettlementSink,
}

impl MatchingEngine {
    /// Create an engine with a validated configuration.
    ///
    /// # Errors
    /// - [`SwiftfillError::ChainNotAllowed`] if `local_chain` is 0
    /// - [`SwiftfillError::InvalidEndpoint`] if `address` or
    ///   `fee_recipient` is the zero address
    /// - configuration validation errors from
    ///   [`AuctionParameters::validate`]
    pub fn new(
        local_chain: u16,
        address: UniversalAddress,
        fee_recipient: UniversalAddress,
        config: AuctionParameters,
    ) -> Result<Self> {
        if local_chain == 0 {
            return Err(SwiftfillError::ChainNotAllowed);
        }
        if address.is_zero() || fee_recipient.is_zero() {
            return Err(SwiftfillError::InvalidEndpoint);
        }
        config.validate()?;
        Ok(Self {
            local_chain,
            address,
            fee_recipient,
            config,
            registry: EndpointRegistry::new(),
            auctions: AuctionStore::new(),
            fast_fills: FastFillLedger::new(),
            sink: SettlementSink::new(local_chain),
        })
    }

    // =====================================================================
    // Admin surface (caller is trusted; ownership plumbing lives elsewhere)
    // =====================================================================

    /// Register (or replace) the router for a chain.
    ///
    /// # Errors
    /// See [`EndpointRegistry::add_endpoint`].
    pub fn add_endpoint(&mut self, chain: u16, router: UniversalAddress) -> Result<()> {
        self.registry.add_endpoint(chain, router)
    }

    /// Replace the auction configuration atomically.
    ///
    /// # Errors
    /// Validation errors from [`AuctionParameters::validate`]; on error the
    /// previous configuration stays in force.
    pub fn set_config(&mut self, config: AuctionParameters) -> Result<()> {
        config.validate()?;
        self.config = config;
        tracing::info!(?config, "Auction configuration replaced");
        Ok(())
    }

    /// Point the base-fee payout at a new recipient.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::InvalidEndpoint`] for the zero address.
    pub fn update_fee_recipient(&mut self, recipient: UniversalAddress) -> Result<()> {
        if recipient.is_zero() {
            return Err(SwiftfillError::InvalidEndpoint);
        }
        self.fee_recipient = recipient;
        Ok(())
    }

    /// Current auction configuration.
    #[must_use]
    pub fn config(&self) -> &AuctionParameters {
        &self.config
    }

    /// The registered router for a chain, if any.
    #[must_use]
    pub fn endpoint_of(&self, chain: u16) -> Option<UniversalAddress> {
        self.registry.endpoint_of(chain)
    }

    /// The auction record for a digest, if one was ever created.
    #[must_use]
    pub fn auction(&self, digest: &Digest) -> Option<&Auction> {
        self.auctions.get(digest)
    }

    /// Whether a fast fill digest has been redeemed.
    #[must_use]
    pub fn fast_fill_redeemed(&self, digest: &Digest) -> bool {
        self.fast_fills.is_redeemed(digest)
    }

    /// This engine's custody and emitter address.
    #[must_use]
    pub fn address(&self) -> UniversalAddress {
        self.address
    }

    /// Current base-fee recipient.
    #[must_use]
    pub fn fee_recipient(&self) -> UniversalAddress {
        self.fee_recipient
    }

    /// The chain this engine lives on.
    #[must_use]
    pub fn local_chain(&self) -> u16 {
        self.local_chain
    }

    // =====================================================================
    // Entry points
    // =====================================================================

    /// Open the auction for a fast market order, or improve the bid of one
    /// already open.
    ///
    /// The caller funds `amount_in + max_fee` into engine custody. A racing
    /// caller whose digest is already taken is rerouted to
    /// [`improve_bid`](Self::improve_bid) rather than wasting the call.
    ///
    /// # Errors
    /// `InvalidMessage`, `NotFastMarketOrder`, `InvalidSourceRouter`,
    /// `InvalidTargetRouter`, `DeadlineExceeded`, `BidPriceTooHigh`,
    /// ledger failures — or, on the rerouted path, any
    /// [`improve_bid`](Self::improve_bid) error.
    pub fn place_initial_bid<B: MessageBus>(
        &mut self,
        bus: &B,
        ledger: &mut TokenLedger,
        env: BlockEnv,
        caller: UniversalAddress,
        fast_message: &[u8],
        fee_bid: u128,
    ) -> Result<BidOutcome> {
        let vm = bus.verify(fast_message)?;
        let order = FastMarketOrder::decode(&vm.payload)?;
        self.require_source_router(&vm)?;
        self.require_target_router(order.target_chain)?;

        // A live (or dead) record means someone else won the race to open.
        if self.auctions.get(&vm.digest).is_some() {
            return self
                .improve_bid(ledger, env, caller, vm.digest, fee_bid)
                .map(BidOutcome::Improved);
        }

        if order.deadline != 0 && env.now_secs() >= i64::from(order.deadline) {
            return Err(SwiftfillError::DeadlineExceeded {
                deadline: order.deadline,
                now: env.now_secs(),
            });
        }
        if fee_bid > order.max_fee {
            return Err(SwiftfillError::BidPriceTooHigh {
                bid: fee_bid,
                max_fee: order.max_fee,
            });
        }

        // Pull principal + deposit into custody before any state write.
        let funding = order
            .amount_in
            .checked_add(order.max_fee)
            .ok_or(SwiftfillError::ArithmeticOverflow)?;
        ledger.transfer(caller, self.address, funding)?;

        let auction = Auction::open(env.block, caller, order.amount_in, order.max_fee, fee_bid);
        self.auctions.open(vm.digest, auction)?;

        tracing::info!(
            digest = %vm.digest,
            amount = order.amount_in,
            fee_bid,
            bidder = %caller,
            "Auction started"
        );
        Ok(BidOutcome::Started(AuctionStarted {
            digest: vm.digest,
            amount: order.amount_in,
            fee_bid,
            bidder: caller,
        }))
    }

    /// Replace the best bid with a strictly lower one.
    ///
    /// The new bidder pays `amount + security_deposit` straight to the
    /// previous best bidder; engine custody never changes hands.
    ///
    /// # Errors
    /// `AuctionNotActive`, `AuctionPeriodExpired`, `OfferPriceNotImproved`,
    /// ledger failures.
    pub fn improve_bid(
        &mut self,
        ledger: &mut TokenLedger,
        env: BlockEnv,
        caller: UniversalAddress,
        digest: Digest,
        fee_bid: u128,
    ) -> Result<NewBid> {
        let duration = self.config.duration;
        let auction = self
            .auctions
            .get_mut(&digest)
            .ok_or(SwiftfillError::AuctionNotActive(digest))?;
        if auction.status != AuctionStatus::Active {
            return Err(SwiftfillError::AuctionNotActive(digest));
        }
        let elapsed = env.block.saturating_sub(auction.start_block);
        if elapsed > duration {
            return Err(SwiftfillError::AuctionPeriodExpired { elapsed, duration });
        }
        if fee_bid >= auction.bid_price {
            return Err(SwiftfillError::OfferPriceNotImproved {
                bid: fee_bid,
                current: auction.bid_price,
            });
        }

        // Funnel the stake from the new bidder to the outgoing one.
        ledger.transfer(caller, auction.highest_bidder, auction.total_custody())?;

        let old_bid = auction.bid_price;
        auction.bid_price = fee_bid;
        auction.highest_bidder = caller;

        tracing::info!(
            digest = %digest,
            new_bid = fee_bid,
            old_bid,
            bidder = %caller,
            "Bid improved"
        );
        Ok(NewBid {
            digest,
            new_bid: fee_bid,
            old_bid,
            bidder: caller,
        })
    }

    /// Execute a fast order whose bidding window has closed.
    ///
    /// Within the grace period only the highest bidder may execute and is
    /// made whole. Past it, anyone may liquidate: the deposit is slashed by
    /// the penalty curve, the liquidator keeps the penalty, the user gains
    /// the reward share, and the winner gets what remains. Either way the
    /// user amount leaves through the settlement sink in exactly one
    /// message and the initial bidder collects `init_auction_fee`.
    ///
    /// # Errors
    /// `InvalidMessage`, `AuctionNotActive`, `AuctionPeriodNotExpired`,
    /// `NotFastMarketOrder`, `NotHighestBidder`, `InvalidTargetRouter`,
    /// `ArithmeticOverflow`, ledger failures.
    pub fn execute_fast_order<B: MessageBus, R: BurnMintRail>(
        &mut self,
        bus: &mut B,
        rail: &mut R,
        ledger: &mut TokenLedger,
        env: BlockEnv,
        caller: UniversalAddress,
        fast_message: &[u8],
    ) -> Result<FastExecution> {
        let vm = bus.verify(fast_message)?;
        let auction = *self
            .auctions
            .get(&vm.digest)
            .filter(|auction| auction.status == AuctionStatus::Active)
            .ok_or(SwiftfillError::AuctionNotActive(vm.digest))?;

        let elapsed = env.block.saturating_sub(auction.start_block);
        if elapsed <= self.config.duration {
            return Err(SwiftfillError::AuctionPeriodNotExpired {
                elapsed,
                duration: self.config.duration,
            });
        }

        let order = FastMarketOrder::decode(&vm.payload)?;

        let (split, executor_payout) = if elapsed <= self.config.grace_period {
            if caller != auction.highest_bidder {
                return Err(SwiftfillError::NotHighestBidder);
            }
            (penalty::PenaltySplit::ZERO, 0)
        } else {
            let split = penalty::assess(&self.config, auction.security_deposit, elapsed);
            (split, split.penalty)
        };

        // bid_price + security_deposit - penalty - user_reward
        let winner_payout = auction
            .bid_price
            .checked_add(auction.security_deposit)
            .and_then(|total| total.checked_sub(split.penalty))
            .and_then(|total| total.checked_sub(split.user_reward))
            .ok_or(SwiftfillError::ArithmeticOverflow)?;

        // amount - bid_price - init_auction_fee + user_reward
        let user_amount = auction
            .amount
            .checked_sub(auction.bid_price)
            .and_then(|amount| amount.checked_sub(order.init_auction_fee))
            .and_then(|amount| amount.checked_add(split.user_reward))
            .ok_or(SwiftfillError::ArithmeticOverflow)?;

        let mint_recipient = self.require_target_router(order.target_chain)?;

        // State first, disbursements after.
        self.auctions
            .get_mut(&vm.digest)
            .ok_or_else(|| SwiftfillError::Internal("auction vanished mid-call".into()))?
            .status = AuctionStatus::Completed;

        ledger.transfer(self.address, auction.highest_bidder, winner_payout)?;
        ledger.transfer(self.address, caller, executor_payout)?;

        let fill = Fill {
            source_chain: vm.emitter_chain,
            order_sender: order.sender,
            redeemer: order.redeemer,
            redeemer_message: order.redeemer_message,
        };
        let sequence = self.sink.send_to_destination(
            bus,
            rail,
            ledger,
            self.address,
            user_amount,
            order.target_chain,
            order.destination_domain,
            mint_recipient,
            fill,
        )?;

        ledger.transfer(self.address, auction.initial_bidder, order.init_auction_fee)?;

        tracing::info!(
            digest = %vm.digest,
            sequence,
            user_amount,
            penalty = split.penalty,
            user_reward = split.user_reward,
            executor = %caller,
            "Fast order executed"
        );
        Ok(FastExecution {
            digest: vm.digest,
            sequence,
            user_amount,
            penalty: split.penalty,
            user_reward: split.user_reward,
        })
    }

    /// Redeem the finalized canonical transfer and reconcile it with the
    /// fast path.
    ///
    /// Dispatches on what the fast path has done so far:
    /// - no auction → the slow transfer settles the order itself and the
    ///   digest is closed forever;
    /// - auction still active → the winner never executed; the caller
    ///   collects `penalty + base_fee`, the winner is refunded minus the
    ///   slash, the user amount (plus reward) is forwarded;
    /// - completed → the minted principal reimburses the winner's advance.
    ///
    /// # Errors
    /// `InvalidMessage`, `NotFastMarketOrder`, `VaaMismatch`,
    /// `MalformedPayload`, `InvalidSourceRouter`, `InvalidTargetRouter`,
    /// `InvalidAuctionStatus` (already settled), `ArithmeticOverflow`,
    /// ledger failures.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_slow_and_reconcile<B: MessageBus, R: BurnMintRail>(
        &mut self,
        bus: &mut B,
        rail: &mut R,
        ledger: &mut TokenLedger,
        env: BlockEnv,
        caller: UniversalAddress,
        fast_message: &[u8],
        attested_burn: &[u8],
    ) -> Result<SlowSettlement> {
        let vm = bus.verify(fast_message)?;
        let order = FastMarketOrder::decode(&vm.payload)?;

        let redeemed = rail.redeem(ledger, attested_burn)?;
        if vm.emitter_chain != redeemed.source_chain {
            return Err(SwiftfillError::VaaMismatch {
                reason: format!(
                    "source chain {} != fast emitter chain {}",
                    redeemed.source_chain, vm.emitter_chain
                ),
            });
        }
        if order.slow_emitter != redeemed.sender {
            return Err(SwiftfillError::VaaMismatch {
                reason: format!(
                    "sender {} != order slow emitter {}",
                    redeemed.sender, order.slow_emitter
                ),
            });
        }
        if order.slow_sequence != redeemed.sequence {
            return Err(SwiftfillError::VaaMismatch {
                reason: format!(
                    "sequence {} != order slow sequence {}",
                    redeemed.sequence, order.slow_sequence
                ),
            });
        }

        let response = SlowOrderResponse::decode(&redeemed.payload)?;
        let base_fee = response.base_fee;

        match self.auctions.get(&vm.digest).copied() {
            // Slow beat fast: no auction ever opened. Settle directly and
            // close the digest so a stale fast message can never open one.
            None => {
                self.require_source_router(&vm)?;
                let mint_recipient = self.require_target_router(order.target_chain)?;
                let user_amount = order
                    .amount_in
                    .checked_sub(base_fee)
                    .ok_or(SwiftfillError::ArithmeticOverflow)?;

                self.auctions
                    .open(vm.digest, Auction::settled_externally(env.block))?;

                let fill = Fill {
                    source_chain: vm.emitter_chain,
                    order_sender: order.sender,
                    redeemer: order.redeemer,
                    redeemer_message: order.redeemer_message,
                };
                let sequence = self.sink.send_to_destination(
                    bus,
                    rail,
                    ledger,
                    self.address,
                    user_amount,
                    order.target_chain,
                    order.destination_domain,
                    mint_recipient,
                    fill,
                )?;
                ledger.transfer(self.address, self.fee_recipient, base_fee)?;

                tracing::info!(
                    digest = %vm.digest,
                    user_amount,
                    base_fee,
                    "Order settled by canonical transfer before any bid"
                );
                Ok(SlowSettlement {
                    digest: vm.digest,
                    base_fee,
                    penalty: 0,
                    user_reward: 0,
                    sequence: Some(sequence),
                })
            }

            // The slow transfer overtook a stalled auction: settle it with
            // penalties as if liquidated, funded by custody plus the mint.
            Some(auction) if auction.status == AuctionStatus::Active => {
                let mint_recipient = self.require_target_router(order.target_chain)?;
                let elapsed = env.block.saturating_sub(auction.start_block);
                let split = penalty::assess(&self.config, auction.security_deposit, elapsed);

                let caller_payout = split
                    .penalty
                    .checked_add(base_fee)
                    .ok_or(SwiftfillError::ArithmeticOverflow)?;
                // amount + security_deposit - penalty - user_reward
                let winner_payout = auction
                    .total_custody()
                    .checked_sub(split.penalty)
                    .and_then(|total| total.checked_sub(split.user_reward))
                    .ok_or(SwiftfillError::ArithmeticOverflow)?;
                // amount - base_fee + user_reward
                let user_amount = auction
                    .amount
                    .checked_sub(base_fee)
                    .and_then(|amount| amount.checked_add(split.user_reward))
                    .ok_or(SwiftfillError::ArithmeticOverflow)?;

                self.auctions
                    .get_mut(&vm.digest)
                    .ok_or_else(|| SwiftfillError::Internal("auction vanished mid-call".into()))?
                    .status = AuctionStatus::Settled;

                ledger.transfer(self.address, caller, caller_payout)?;
                ledger.transfer(self.address, auction.highest_bidder, winner_payout)?;

                let fill = Fill {
                    source_chain: vm.emitter_chain,
                    order_sender: order.sender,
                    redeemer: order.redeemer,
                    redeemer_message: order.redeemer_message,
                };
                let sequence = self.sink.send_to_destination(
                    bus,
                    rail,
                    ledger,
                    self.address,
                    user_amount,
                    order.target_chain,
                    order.destination_domain,
                    mint_recipient,
                    fill,
                )?;

                tracing::info!(
                    digest = %vm.digest,
                    user_amount,
                    base_fee,
                    penalty = split.penalty,
                    user_reward = split.user_reward,
                    "Stalled auction settled by canonical transfer"
                );
                Ok(SlowSettlement {
                    digest: vm.digest,
                    base_fee,
                    penalty: split.penalty,
                    user_reward: split.user_reward,
                    sequence: Some(sequence),
                })
            }

            // Fast path already delivered: the mint reimburses the winner's
            // fronted principal and the digest closes for good.
            Some(auction) if auction.status == AuctionStatus::Completed => {
                self.auctions
                    .get_mut(&vm.digest)
                    .ok_or_else(|| SwiftfillError::Internal("auction vanished mid-call".into()))?
                    .status = AuctionStatus::Settled;

                ledger.transfer(self.address, auction.highest_bidder, auction.amount)?;

                tracing::info!(
                    digest = %vm.digest,
                    amount = auction.amount,
                    winner = %auction.highest_bidder,
                    "Winner reimbursed from canonical transfer"
                );
                Ok(SlowSettlement {
                    digest: vm.digest,
                    base_fee,
                    penalty: 0,
                    user_reward: 0,
                    sequence: None,
                })
            }

            Some(auction) => Err(SwiftfillError::InvalidAuctionStatus {
                status: auction.status,
            }),
        }
    }

    /// Redeem a fast fill the engine previously emitted for this chain.
    ///
    /// Only the registered local peer router may redeem, each digest at most
    /// once; `fill_amount` moves from engine custody to the router.
    ///
    /// # Errors
    /// `InvalidMessage`, `InvalidEmitterForFastFill`,
    /// `FastFillAlreadyRedeemed`, `InvalidSourceRouter`,
    /// `MalformedPayload`, ledger failures.
    pub fn redeem_fast_fill<B: MessageBus>(
        &mut self,
        bus: &B,
        ledger: &mut TokenLedger,
        caller: UniversalAddress,
        fast_fill_message: &[u8],
    ) -> Result<FastFill> {
        let vm = bus.verify(fast_fill_message)?;
        if vm.emitter_chain != self.local_chain || vm.emitter_address != self.address {
            return Err(SwiftfillError::InvalidEmitterForFastFill);
        }
        if self.fast_fills.is_redeemed(&vm.digest) {
            return Err(SwiftfillError::FastFillAlreadyRedeemed(vm.digest));
        }
        let local_router = self
            .registry
            .endpoint_of(self.local_chain)
            .ok_or(SwiftfillError::InvalidSourceRouter {
                chain: self.local_chain,
            })?;
        if caller != local_router {
            return Err(SwiftfillError::InvalidSourceRouter {
                chain: self.local_chain,
            });
        }
        let fast_fill = FastFill::decode(&vm.payload)?;

        self.fast_fills.mark_redeemed(vm.digest)?;
        ledger.transfer(self.address, caller, fast_fill.fill_amount)?;

        tracing::info!(
            digest = %vm.digest,
            fill_amount = fast_fill.fill_amount,
            router = %caller,
            "Fast fill redeemed"
        );
        Ok(fast_fill)
    }

    // =====================================================================
    // Path checks
    // =====================================================================

    fn require_source_router(&self, vm: &VerifiedMessage) -> Result<()> {
        match self.registry.endpoint_of(vm.emitter_chain) {
            Some(router) if router == vm.emitter_address => Ok(()),
            _ => Err(SwiftfillError::InvalidSourceRouter {
                chain: vm.emitter_chain,
            }),
        }
    }

    fn require_target_router(&self, chain: u16) -> Result<UniversalAddress> {
        self.registry
            .endpoint_of(chain)
            .ok_or(SwiftfillError::InvalidTargetRouter { chain })
    }
}
