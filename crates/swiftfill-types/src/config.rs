//! Auction parameter configuration.
//!
//! A single set of parameters governs every auction: how long bids are
//! accepted, how long the winner may take to execute without penalty, and
//! how the penalty ramps once they are late. All rates are fixed-point
//! basis points with `1_000_000` = 100%.

use serde::{Deserialize, Serialize};

use crate::{constants::MAX_BPS, Result, SwiftfillError};

/// Tunable parameters for the sealed-bid auction and its penalty curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionParameters {
    /// Share of the assessed penalty awarded to the end user, in bps.
    pub user_penalty_reward_bps: u32,
    /// Penalty floor the moment the grace period lapses, in bps.
    pub initial_penalty_bps: u32,
    /// Blocks during which bids are accepted.
    pub duration: u64,
    /// Blocks after the auction starts within which the winner may execute
    /// penalty-free. Includes `duration`.
    pub grace_period: u64,
    /// Blocks over which the penalty ramps from `initial_penalty_bps`
    /// to 100%.
    pub penalty_blocks: u64,
}

impl AuctionParameters {
    /// Validate the parameter set.
    ///
    /// # Errors
    /// - [`SwiftfillError::InvalidAuctionDuration`] if `duration == 0`
    /// - [`SwiftfillError::InvalidAuctionGracePeriod`] if
    ///   `grace_period <= duration`
    /// - [`SwiftfillError::UserPenaltyTooLarge`] /
    ///   [`SwiftfillError::InitialPenaltyTooLarge`] if a rate exceeds 100%
    pub fn validate(&self) -> Result<()> {
        if self.duration == 0 {
            return Err(SwiftfillError::InvalidAuctionDuration);
        }
        if self.grace_period <= self.duration {
            return Err(SwiftfillError::InvalidAuctionGracePeriod {
                grace_period: self.grace_period,
                duration: self.duration,
            });
        }
        if self.user_penalty_reward_bps > MAX_BPS {
            return Err(SwiftfillError::UserPenaltyTooLarge {
                bps: self.user_penalty_reward_bps,
            });
        }
        if self.initial_penalty_bps > MAX_BPS {
            return Err(SwiftfillError::InitialPenaltyTooLarge {
                bps: self.initial_penalty_bps,
            });
        }
        Ok(())
    }

    /// Last block offset (inclusive) at which the winner executes
    /// penalty-free. The penalty curve starts one block later.
    #[must_use]
    pub fn penalty_free_window(&self) -> u64 {
        self.duration.saturating_add(self.grace_period)
    }
}
