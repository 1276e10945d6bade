//! Lateness penalty curve.
//!
//! A winner who executes within `duration + grace_period` blocks of the
//! auction start pays nothing. Past that the security deposit is slashed
//! along a linear ramp: `initial_penalty_bps` at the first late block,
//! 100% once `penalty_blocks` have passed. A share of each slash
//! (`user_penalty_reward_bps`) goes to the end user; the rest pays the
//! liquidator.
//!
//! The total is computed first with a single floor division and only then
//! split, so the two shares cannot drift apart by double rounding.

use swiftfill_types::{constants::MAX_BPS, AuctionParameters};

/// How a slashed deposit is apportioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltySplit {
    /// Paid to whoever executes the late order.
    pub penalty: u128,
    /// Added to the user's delivered amount.
    pub user_reward: u128,
}

impl PenaltySplit {
    /// No slash at all.
    pub const ZERO: Self = Self {
        penalty: 0,
        user_reward: 0,
    };

    /// Total slashed from the deposit.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.penalty + self.user_reward
    }
}

/// Assess the penalty for executing `blocks_elapsed` blocks after the
/// auction start.
///
/// Guarantees `penalty + user_reward <= deposit`, monotone nondecreasing in
/// `blocks_elapsed`, zero through the penalty-free window, and exactly
/// `deposit` once the ramp completes.
#[must_use]
pub fn assess(params: &AuctionParameters, deposit: u128, blocks_elapsed: u64) -> PenaltySplit {
    let penalty_free = params.penalty_free_window();
    if blocks_elapsed <= penalty_free || deposit == 0 {
        return PenaltySplit::ZERO;
    }

    let over = blocks_elapsed - penalty_free;
    let scaled_bps = if over >= params.penalty_blocks {
        MAX_BPS
    } else {
        // Ramp in u128 to dodge intermediate overflow; the quotient is
        // strictly below MAX_BPS - initial because over < penalty_blocks.
        let ramp = u128::from(MAX_BPS - params.initial_penalty_bps) * u128::from(over)
            / u128::from(params.penalty_blocks);
        params.initial_penalty_bps + ramp as u32
    };

    let total = mul_bps(deposit, scaled_bps);
    let user_reward = mul_bps(total, params.user_penalty_reward_bps);
    PenaltySplit {
        penalty: total - user_reward,
        user_reward,
    }
}

/// `value * bps / MAX_BPS` with exact floor semantics and no overflow.
///
/// Splitting `value` at the denominator keeps every intermediate product in
/// range: `(q*M + r) * bps / M == q*bps + r*bps/M` with `r < M`.
fn mul_bps(value: u128, bps: u32) -> u128 {
    let bps = u128::from(bps);
    let denom = u128::from(MAX_BPS);
    (value / denom) * bps + (value % denom) * bps / denom
}
