//! The presigned order that opens an auction.

use swiftfill_types::{Result, SwiftfillError, UniversalAddress};

use crate::{ByteReader, FAST_MARKET_ORDER};

/// A cross-chain fast transfer order.
///
/// Emitted by the source-chain router in parallel with the slower canonical
/// transfer identified by `(slow_emitter, slow_sequence)`. Relayers bid for
/// the right to front `amount_in` on the destination; `max_fee` caps their
/// fee and doubles as the winner's security deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastMarketOrder {
    /// User principal entering the auction.
    pub amount_in: u128,
    /// Minimum the user accepts on the destination after fees.
    pub min_amount_out: u128,
    /// Chain the funds are destined for.
    pub target_chain: u16,
    /// Transport-level domain of the destination, for the burn-and-mint rail.
    pub destination_domain: u32,
    /// Account allowed to redeem the fill on the destination.
    pub redeemer: UniversalAddress,
    /// Order originator on the source chain.
    pub sender: UniversalAddress,
    /// Refund target if the order dies on the source chain.
    pub refund_address: UniversalAddress,
    /// Emitter of the paired canonical transfer.
    pub slow_emitter: UniversalAddress,
    /// Sequence of the paired canonical transfer.
    pub slow_sequence: u64,
    /// Fee cap for bids; also the winner's security deposit.
    pub max_fee: u128,
    /// Reward for whoever pays the gas to open the auction.
    pub init_auction_fee: u128,
    /// Unix seconds after which no auction may open. `0` = no deadline.
    pub deadline: u32,
    /// Opaque bytes delivered to the redeemer with the fill.
    pub redeemer_message: Vec<u8>,
}

impl FastMarketOrder {
    /// Encode to canonical bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(215 + self.redeemer_message.len());
        buf.push(FAST_MARKET_ORDER);
        buf.extend_from_slice(&self.amount_in.to_be_bytes());
        buf.extend_from_slice(&self.min_amount_out.to_be_bytes());
        buf.extend_from_slice(&self.target_chain.to_be_bytes());
        buf.extend_from_slice(&self.destination_domain.to_be_bytes());
        buf.extend_from_slice(self.redeemer.as_bytes());
        buf.extend_from_slice(self.sender.as_bytes());
        buf.extend_from_slice(self.refund_address.as_bytes());
        buf.extend_from_slice(self.slow_emitter.as_bytes());
        buf.extend_from_slice(&self.slow_sequence.to_be_bytes());
        buf.extend_from_slice(&self.max_fee.to_be_bytes());
        buf.extend_from_slice(&self.init_auction_fee.to_be_bytes());
        buf.extend_from_slice(&self.deadline.to_be_bytes());
        buf.extend_from_slice(&(self.redeemer_message.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.redeemer_message);
        buf
    }

    /// Decode from canonical bytes.
    ///
    /// # Errors
    /// - [`SwiftfillError::NotFastMarketOrder`] if the discriminant is any
    ///   other payload type
    /// - [`SwiftfillError::MalformedPayload`] on length mismatch or
    ///   trailing bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        if reader.read_u8()? != FAST_MARKET_ORDER {
            return Err(SwiftfillError::NotFastMarketOrder);
        }
        let order = Self {
            amount_in: reader.read_u128()?,
            min_amount_out: reader.read_u128()?,
            target_chain: reader.read_u16()?,
            destination_domain: reader.read_u32()?,
            redeemer: reader.read_address()?,
            sender: reader.read_address()?,
            refund_address: reader.read_address()?,
            slow_emitter: reader.read_address()?,
            slow_sequence: reader.read_u64()?,
            max_fee: reader.read_u128()?,
            init_auction_fee: reader.read_u128()?,
            deadline: reader.read_u32()?,
            redeemer_message: reader.read_prefixed_bytes()?,
        };
        reader.finish()?;
        Ok(order)
    }
}
