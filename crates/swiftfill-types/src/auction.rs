//! Live auction state.
//!
//! One record per message digest, created by the first accepted bid and
//! mutated only by the engine. Status moves one way:
//! `Active → Completed → Settled`, or straight to `Settled` when the
//! canonical transfer lands before any bid was placed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UniversalAddress;

/// Status of an auction record.
///
/// A digest with no record at all is the fourth, implicit state: no bid has
/// ever been accepted. Absent entries are indistinguishable from it by
/// construction — there is no nullable struct to confuse with a real record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionStatus {
    /// Bids are being accepted, or execution is pending.
    Active,
    /// The fast order was executed; the slow transfer will reimburse.
    Completed,
    /// Terminal. The digest can never host another auction.
    Settled,
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Settled => write!(f, "SETTLED"),
        }
    }
}

/// Per-digest auction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Current lifecycle status.
    pub status: AuctionStatus,
    /// Block at which the initial bid landed. Immutable once set.
    pub start_block: u64,
    /// Whoever paid the gas to open the auction. Immutable once set.
    pub initial_bidder: UniversalAddress,
    /// Current best bidder. Equals `initial_bidder` until improved.
    pub highest_bidder: UniversalAddress,
    /// User principal (the order's `amount_in`). Immutable once set.
    pub amount: u128,
    /// Collateral equal to the order's `max_fee`, carried by whoever holds
    /// the best bid. Immutable once set.
    pub security_deposit: u128,
    /// Current best fee bid. Strictly decreases across improvements.
    pub bid_price: u128,
}

impl Auction {
    /// Open a new auction from the initial bid.
    #[must_use]
    pub fn open(
        start_block: u64,
        bidder: UniversalAddress,
        amount: u128,
        security_deposit: u128,
        bid_price: u128,
    ) -> Self {
        Self {
            status: AuctionStatus::Active,
            start_block,
            initial_bidder: bidder,
            highest_bidder: bidder,
            amount,
            security_deposit,
            bid_price,
        }
    }

    /// Terminal record for a digest settled by the canonical transfer before
    /// any bid arrived. Holds no custody and names no bidder; it exists only
    /// so the digest can never be reopened.
    #[must_use]
    pub fn settled_externally(settled_block: u64) -> Self {
        Self {
            status: AuctionStatus::Settled,
            start_block: settled_block,
            initial_bidder: UniversalAddress::ZERO,
            highest_bidder: UniversalAddress::ZERO,
            amount: 0,
            security_deposit: 0,
            bid_price: 0,
        }
    }

    /// Tokens the engine custodies for this auction while it is active.
    ///
    /// The sum fits `u128` because both legs were pulled from the initial
    /// bidder in a single checked transfer when the auction was funded.
    #[must_use]
    pub fn total_custody(&self) -> u128 {
        self.amount + self.security_deposit
    }
}
