//! Fast fill redemption guard — prevents double-redemption.
//!
//! Each fast fill message the engine emits can be redeemed by the local
//! peer router exactly once. The guard is a permanent set: replay
//! protection may never evict, so unlike a settlement cache there is no
//! size bound. One digest is 32 bytes; the set grows with the local fill
//! count only.

use std::collections::HashSet;

use swiftfill_types::{Digest, Result, SwiftfillError};

/// Tracks which fast fill digests have been redeemed.
#[derive(Debug, Default)]
pub struct FastFillLedger {
    /// Digests already paid out.
    redeemed: HashSet<Digest>,
}

impl FastFillLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            redeemed: HashSet::new(),
        }
    }

    /// Whether a digest has already been redeemed.
    #[must_use]
    pub fn is_redeemed(&self, digest: &Digest) -> bool {
        self.redeemed.contains(digest)
    }

    /// Mark a digest as redeemed.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::FastFillAlreadyRedeemed`] if the digest was
    /// already marked.
    pub fn mark_redeemed(&mut self, digest: Digest) -> Result<()> {
        if !self.redeemed.insert(digest) {
            return Err(SwiftfillError::FastFillAlreadyRedeemed(digest));
        }
        Ok(())
    }

    /// Number of digests redeemed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.redeemed.len()
    }

    /// Whether nothing has been redeemed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.redeemed.is_empty()
    }
}
