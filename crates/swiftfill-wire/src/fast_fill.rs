//! Same-chain settlement message.

use swiftfill_types::{Result, SwiftfillError};

use crate::{ByteReader, Fill, FAST_FILL};

/// Settlement emitted when an order's target chain is the engine's own.
///
/// Instead of a burn-and-mint transfer, the engine keeps custody and
/// publishes this message; the local peer router redeems it for
/// `fill_amount`. The inner [`Fill`] is inlined without its discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastFill {
    /// Tokens the local router may claim.
    pub fill_amount: u128,
    /// Who may redeem them, and the message to deliver.
    pub fill: Fill,
}

impl FastFill {
    /// Encode to canonical bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(87 + self.fill.redeemer_message.len());
        buf.push(FAST_FILL);
        buf.extend_from_slice(&self.fill_amount.to_be_bytes());
        self.fill.encode_body(&mut buf);
        buf
    }

    /// Decode from canonical bytes.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::MalformedPayload`] on a wrong discriminant,
    /// length mismatch, or trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let discriminant = reader.read_u8()?;
        if discriminant != FAST_FILL {
            return Err(SwiftfillError::MalformedPayload {
                reason: format!("expected fast fill discriminant, got 0x{discriminant:02X}"),
            });
        }
        let fill_amount = reader.read_u128()?;
        let fill = Fill::decode_body(&mut reader)?;
        reader.finish()?;
        Ok(Self { fill_amount, fill })
    }
}
