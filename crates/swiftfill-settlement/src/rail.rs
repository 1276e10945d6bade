//! Canonical burn-and-mint transport seam.
//!
//! The real rail burns the settlement asset here and mints it on the target
//! chain once the transfer finalizes; the engine only sees the two
//! operations in [`BurnMintRail`]. [`MemoryRail`] is the in-process
//! reference: outbound burns are recorded, inbound transfers are staged by
//! fixtures and redeemable exactly once.

use std::collections::HashMap;

use swiftfill_types::{Result, SwiftfillError, TokenLedger, UniversalAddress};

/// A finalized inbound transfer, redeemed and minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemedTransfer {
    /// Chain the burn happened on.
    pub source_chain: u16,
    /// Burner address on the source chain.
    pub sender: UniversalAddress,
    /// Source-scoped transfer sequence.
    pub sequence: u64,
    /// Tokens minted to the recipient.
    pub amount: u128,
    /// Auxiliary payload carried with the transfer.
    pub payload: Vec<u8>,
}

/// An outbound burn accepted by the rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundTransfer {
    /// Sequence assigned to the transfer.
    pub sequence: u64,
    /// Tokens burned.
    pub amount: u128,
    /// Chain the mint will happen on.
    pub target_chain: u16,
    /// Transport-level domain of the destination.
    pub destination_domain: u32,
    /// Account the mint is addressed to.
    pub mint_recipient: UniversalAddress,
    /// Auxiliary payload to deliver alongside the mint.
    pub payload: Vec<u8>,
}

/// Seam to the canonical burn-and-mint transport.
pub trait BurnMintRail {
    /// Burn `amount` from `from` and enqueue a transfer toward
    /// `mint_recipient` on the target chain. Returns the transfer sequence.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::InsufficientBalance`] if `from` cannot
    /// cover the burn.
    #[allow(clippy::too_many_arguments)]
    fn burn(
        &mut self,
        ledger: &mut TokenLedger,
        from: UniversalAddress,
        amount: u128,
        target_chain: u16,
        destination_domain: u32,
        mint_recipient: UniversalAddress,
        payload: Vec<u8>,
    ) -> Result<u64>;

    /// Redeem a finalized inbound transfer: mint its tokens to the recipient
    /// and return the parsed transfer. Each transfer redeems at most once.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::InvalidMessage`] if the attestation is
    /// unknown, malformed, or already redeemed.
    fn redeem(
        &mut self,
        ledger: &mut TokenLedger,
        attested_burn: &[u8],
    ) -> Result<RedeemedTransfer>;
}

/// A transfer staged for redemption on this chain.
#[derive(Debug, Clone)]
struct StagedInbound {
    source_chain: u16,
    sender: UniversalAddress,
    sequence: u64,
    amount: u128,
    mint_recipient: UniversalAddress,
    payload: Vec<u8>,
}

/// In-process reference rail.
#[derive(Debug, Default)]
pub struct MemoryRail {
    next_sequence: u64,
    next_handle: u64,
    outbound: Vec<OutboundTransfer>,
    staged: HashMap<u64, StagedInbound>,
}

impl MemoryRail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a finalized inbound transfer and return the attestation bytes
    /// a relayer would submit to redeem it.
    pub fn stage_inbound(
        &mut self,
        source_chain: u16,
        sender: UniversalAddress,
        sequence: u64,
        amount: u128,
        mint_recipient: UniversalAddress,
        payload: Vec<u8>,
    ) -> Vec<u8> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.staged.insert(
            handle,
            StagedInbound {
                source_chain,
                sender,
                sequence,
                amount,
                mint_recipient,
                payload,
            },
        );
        handle.to_be_bytes().to_vec()
    }

    /// Outbound transfers accepted so far, oldest first.
    #[must_use]
    pub fn outbound(&self) -> &[OutboundTransfer] {
        &self.outbound
    }
}

impl BurnMintRail for MemoryRail {
    fn burn(
        &mut self,
        ledger: &mut TokenLedger,
        from: UniversalAddress,
        amount: u128,
        target_chain: u16,
        destination_domain: u32,
        mint_recipient: UniversalAddress,
        payload: Vec<u8>,
    ) -> Result<u64> {
        ledger.burn(from, amount)?;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        tracing::info!(
            sequence,
            amount,
            target_chain,
            destination_domain,
            mint_recipient = %mint_recipient,
            "Outbound transfer burned"
        );
        self.outbound.push(OutboundTransfer {
            sequence,
            amount,
            target_chain,
            destination_domain,
            mint_recipient,
            payload,
        });
        Ok(sequence)
    }

    fn redeem(
        &mut self,
        ledger: &mut TokenLedger,
        attested_burn: &[u8],
    ) -> Result<RedeemedTransfer> {
        let handle_bytes: [u8; 8] =
            attested_burn
                .try_into()
                .map_err(|_| SwiftfillError::InvalidMessage {
                    reason: format!("bad burn attestation length {}", attested_burn.len()),
                })?;
        let handle = u64::from_be_bytes(handle_bytes);
        let staged = self
            .staged
            .remove(&handle)
            .ok_or_else(|| SwiftfillError::InvalidMessage {
                reason: format!("unknown or already redeemed transfer {handle}"),
            })?;
        ledger.mint(staged.mint_recipient, staged.amount)?;
        tracing::info!(
            source_chain = staged.source_chain,
            sender = %staged.sender,
            sequence = staged.sequence,
            amount = staged.amount,
            "Inbound transfer redeemed"
        );
        Ok(RedeemedTransfer {
            source_chain: staged.source_chain,
            sender: staged.sender,
            sequence: staged.sequence,
            amount: staged.amount,
            payload: staged.payload,
        })
    }
}
