//! Settlement instruction delivered to the destination router.

use swiftfill_types::{Result, SwiftfillError, UniversalAddress};

use crate::{ByteReader, FILL};

/// Tells the destination router who may claim the transferred funds.
///
/// Produced by the engine when a fast order executes; carried either in the
/// burn-and-mint transfer's auxiliary payload (cross-chain) or inside a
/// [`FastFill`](crate::FastFill) message (same chain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    /// Chain the order originated on.
    pub source_chain: u16,
    /// Order originator on the source chain.
    pub order_sender: UniversalAddress,
    /// Account allowed to redeem the funds.
    pub redeemer: UniversalAddress,
    /// Opaque bytes handed to the redeemer.
    pub redeemer_message: Vec<u8>,
}

impl Fill {
    /// Encode to canonical bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(71 + self.redeemer_message.len());
        buf.push(FILL);
        self.encode_body(&mut buf);
        buf
    }

    /// Append the fields without the discriminant, for messages that inline
    /// a fill.
    pub(crate) fn encode_body(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.source_chain.to_be_bytes());
        buf.extend_from_slice(self.order_sender.as_bytes());
        buf.extend_from_slice(self.redeemer.as_bytes());
        buf.extend_from_slice(&(self.redeemer_message.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.redeemer_message);
    }

    /// Decode from canonical bytes.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::MalformedPayload`] on a wrong discriminant,
    /// length mismatch, or trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let discriminant = reader.read_u8()?;
        if discriminant != FILL {
            return Err(SwiftfillError::MalformedPayload {
                reason: format!("expected fill discriminant, got 0x{discriminant:02X}"),
            });
        }
        let fill = Self::decode_body(&mut reader)?;
        reader.finish()?;
        Ok(fill)
    }

    /// Read the fields without the discriminant.
    pub(crate) fn decode_body(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            source_chain: reader.read_u16()?,
            order_sender: reader.read_address()?,
            redeemer: reader.read_address()?,
            redeemer_message: reader.read_prefixed_bytes()?,
        })
    }
}
