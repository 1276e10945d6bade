//! Digest-keyed auction store.
//!
//! Guarantees one auction record per digest for the lifetime of the store:
//! [`AuctionStore::open`] is the only way to insert and refuses occupied
//! keys. Records are never removed; terminal statuses close a digest
//! forever.

use std::collections::HashMap;

use swiftfill_types::{Auction, AuctionStatus, Digest, Result, SwiftfillError};

/// All auction records, live and terminal.
#[derive(Debug, Default)]
pub struct AuctionStore {
    auctions: HashMap<Digest, Auction>,
}

impl AuctionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auctions: HashMap::new(),
        }
    }

    /// Insert the record for a digest seen for the first time.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::AuctionAlreadyStarted`] if a record already
    /// exists. The engine reroutes racing initial bids before calling this,
    /// so the error marks a caller bug rather than a race.
    pub fn open(&mut self, digest: Digest, auction: Auction) -> Result<()> {
        if self.auctions.contains_key(&digest) {
            return Err(SwiftfillError::AuctionAlreadyStarted(digest));
        }
        self.auctions.insert(digest, auction);
        Ok(())
    }

    /// The record for a digest, if one was ever created.
    #[must_use]
    pub fn get(&self, digest: &Digest) -> Option<&Auction> {
        self.auctions.get(digest)
    }

    /// Mutable access to a digest's record.
    pub fn get_mut(&mut self, digest: &Digest) -> Option<&mut Auction> {
        self.auctions.get_mut(digest)
    }

    /// The status of a digest's record, if one exists.
    #[must_use]
    pub fn status(&self, digest: &Digest) -> Option<AuctionStatus> {
        self.auctions.get(digest).map(|auction| auction.status)
    }

    /// Number of records ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    /// Whether no auction has ever been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }
}
