//! Observable engine events.
//!
//! Entry points return these alongside logging them, so hosts can surface
//! them however they index events. Settlement emissions are observable on
//! the messaging substrate itself and are not duplicated here.

use serde::{Deserialize, Serialize};

use crate::{Digest, UniversalAddress};

/// A new auction opened from an initial bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionStarted {
    pub digest: Digest,
    /// User principal pulled into custody.
    pub amount: u128,
    /// The opening fee bid.
    pub fee_bid: u128,
    pub bidder: UniversalAddress,
}

/// The best bid was improved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBid {
    pub digest: Digest,
    pub new_bid: u128,
    pub old_bid: u128,
    pub bidder: UniversalAddress,
}

/// Outcome of an initial-bid attempt.
///
/// A racing caller whose digest already hosts an auction is rerouted to a
/// bid improvement rather than failing, so either event can result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidOutcome {
    /// This call opened the auction.
    Started(AuctionStarted),
    /// An auction already existed; this call improved its bid.
    Improved(NewBid),
}
