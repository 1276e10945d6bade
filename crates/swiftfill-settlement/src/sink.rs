//! Settlement sink — routes a fill to its destination.
//!
//! One fill, one message: an order targeting the engine's own chain becomes
//! a published `FastFill` (tokens stay in the sender's custody until the
//! local peer router redeems them); any other target burns the tokens into
//! the canonical transport with the `Fill` as auxiliary payload.

use swiftfill_types::{Result, TokenLedger, UniversalAddress};
use swiftfill_wire::{FastFill, Fill};

use crate::{BurnMintRail, MessageBus};

/// Chooses between the local fast-fill path and the burn-and-mint rail.
#[derive(Debug, Clone, Copy)]
pub struct SettlementSink {
    local_chain: u16,
}

impl SettlementSink {
    #[must_use]
    pub fn new(local_chain: u16) -> Self {
        Self { local_chain }
    }

    /// Chain id this sink treats as local.
    #[must_use]
    pub fn local_chain(&self) -> u16 {
        self.local_chain
    }

    /// Deliver `user_amount` to the destination named by the order.
    ///
    /// Emits exactly one message and returns its sequence. On the local
    /// path the tokens remain with `from` until redemption; on the remote
    /// path they are burned from `from` immediately.
    ///
    /// # Errors
    /// Propagates bus, rail, and ledger failures; on error no message was
    /// published and no tokens moved.
    #[allow(clippy::too_many_arguments)]
    pub fn send_to_destination<B: MessageBus, R: BurnMintRail>(
        &self,
        bus: &mut B,
        rail: &mut R,
        ledger: &mut TokenLedger,
        from: UniversalAddress,
        user_amount: u128,
        target_chain: u16,
        destination_domain: u32,
        mint_recipient: UniversalAddress,
        fill: Fill,
    ) -> Result<u64> {
        if target_chain == self.local_chain {
            let fast_fill = FastFill {
                fill_amount: user_amount,
                fill,
            };
            let sequence = bus.publish(fast_fill.encode())?;
            tracing::info!(
                sequence,
                fill_amount = user_amount,
                "Fast fill published for local redemption"
            );
            Ok(sequence)
        } else {
            rail.burn(
                ledger,
                from,
                user_amount,
                target_chain,
                destination_domain,
                mint_recipient,
                fill.encode(),
            )
        }
    }
}
