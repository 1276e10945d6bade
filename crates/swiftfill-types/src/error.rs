//! Error types for the swiftfill matching engine.
//!
//! All errors use the `SF_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Message / codec errors
//! - 2xx: Routing / registry errors
//! - 3xx: Configuration errors
//! - 4xx: Auction lifecycle errors
//! - 5xx: Bidding errors
//! - 6xx: Reconciliation errors
//! - 7xx: Fast fill errors
//! - 8xx: Token ledger errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{AuctionStatus, Digest};

/// Central error enum for all swiftfill operations.
///
/// Every error is fatal for the current call; callers observe unchanged
/// engine state and may resubmit with corrected inputs.
#[derive(Debug, Error)]
pub enum SwiftfillError {
    // =================================================================
    // Message / Codec Errors (1xx)
    // =================================================================
    /// The attested message failed verification at the substrate.
    #[error("SF_ERR_100: Message verification failed: {reason}")]
    InvalidMessage { reason: String },

    /// A payload had an unknown discriminant, a length mismatch, or
    /// trailing bytes.
    #[error("SF_ERR_101: Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    /// The verified payload is not a fast market order.
    #[error("SF_ERR_102: Payload is not a fast market order")]
    NotFastMarketOrder,

    // =================================================================
    // Routing / Registry Errors (2xx)
    // =================================================================
    /// Chain id 0 is reserved and never a valid endpoint key.
    #[error("SF_ERR_200: Chain id 0 is not allowed")]
    ChainNotAllowed,

    /// The zero address cannot be registered as a router endpoint.
    #[error("SF_ERR_201: Invalid endpoint address")]
    InvalidEndpoint,

    /// The message emitter is not the registered router for its chain.
    #[error("SF_ERR_202: Emitter is not the registered router for chain {chain}")]
    InvalidSourceRouter { chain: u16 },

    /// The order's target chain has no registered router.
    #[error("SF_ERR_203: No registered router for target chain {chain}")]
    InvalidTargetRouter { chain: u16 },

    /// A fast fill message was not emitted by this engine on the local chain.
    #[error("SF_ERR_204: Fast fill emitter is not the local matching engine")]
    InvalidEmitterForFastFill,

    // =================================================================
    // Configuration Errors (3xx)
    // =================================================================
    /// The auction duration must be at least one block.
    #[error("SF_ERR_300: Auction duration must be greater than zero")]
    InvalidAuctionDuration,

    /// The grace period must extend past the auction duration.
    #[error("SF_ERR_301: Grace period {grace_period} must exceed auction duration {duration}")]
    InvalidAuctionGracePeriod { grace_period: u64, duration: u64 },

    /// `user_penalty_reward_bps` exceeds 100%.
    #[error("SF_ERR_302: User penalty reward {bps} bps exceeds 1000000")]
    UserPenaltyTooLarge { bps: u32 },

    /// `initial_penalty_bps` exceeds 100%.
    #[error("SF_ERR_303: Initial penalty {bps} bps exceeds 1000000")]
    InitialPenaltyTooLarge { bps: u32 },

    // =================================================================
    // Auction Lifecycle Errors (4xx)
    // =================================================================
    /// An auction record already exists for this digest.
    #[error("SF_ERR_400: Auction already started for {0}")]
    AuctionAlreadyStarted(Digest),

    /// No active auction exists for this digest.
    #[error("SF_ERR_401: Auction is not active for {0}")]
    AuctionNotActive(Digest),

    /// The bidding window has closed.
    #[error("SF_ERR_402: Auction period expired: {elapsed} blocks elapsed, duration {duration}")]
    AuctionPeriodExpired { elapsed: u64, duration: u64 },

    /// The bidding window is still open; execution is premature.
    #[error("SF_ERR_403: Auction period not expired: {elapsed} blocks elapsed, duration {duration}")]
    AuctionPeriodNotExpired { elapsed: u64, duration: u64 },

    /// The auction is in a status the operation cannot act on.
    #[error("SF_ERR_404: Invalid auction status: {status}")]
    InvalidAuctionStatus { status: AuctionStatus },

    // =================================================================
    // Bidding Errors (5xx)
    // =================================================================
    /// The bid exceeds the order's fee cap.
    #[error("SF_ERR_500: Bid {bid} exceeds the order max fee {max_fee}")]
    BidPriceTooHigh { bid: u128, max_fee: u128 },

    /// The bid does not strictly improve on the current best. Ties lose.
    #[error("SF_ERR_501: Bid {bid} does not improve on current best {current}")]
    OfferPriceNotImproved { bid: u128, current: u128 },

    /// Within the grace period only the highest bidder may execute.
    #[error("SF_ERR_502: Caller is not the highest bidder")]
    NotHighestBidder,

    /// The order's deadline has passed.
    #[error("SF_ERR_503: Order deadline {deadline} exceeded at {now}")]
    DeadlineExceeded { deadline: u32, now: i64 },

    // =================================================================
    // Reconciliation Errors (6xx)
    // =================================================================
    /// The fast message and the redeemed canonical transfer do not
    /// describe the same order.
    #[error("SF_ERR_600: Fast/slow message pair mismatch: {reason}")]
    VaaMismatch { reason: String },

    // =================================================================
    // Fast Fill Errors (7xx)
    // =================================================================
    /// This fast fill digest has already been redeemed.
    #[error("SF_ERR_700: Fast fill already redeemed for {0}")]
    FastFillAlreadyRedeemed(Digest),

    // =================================================================
    // Token Ledger Errors (8xx)
    // =================================================================
    /// Not enough balance to perform the transfer.
    #[error("SF_ERR_800: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    /// An amount computation would wrap.
    #[error("SF_ERR_801: Arithmetic overflow in amount computation")]
    ArithmeticOverflow,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SF_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SwiftfillError>;
