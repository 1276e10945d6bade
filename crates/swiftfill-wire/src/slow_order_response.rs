//! Fee notice carried by the finalized canonical transfer.

use swiftfill_types::{Result, SwiftfillError};

use crate::{ByteReader, SLOW_ORDER_RESPONSE};

/// Auxiliary payload of the slow transfer: the base fee the protocol keeps
/// when the canonical path settles the order itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowOrderResponse {
    /// Protocol fee in settlement-asset base units.
    pub base_fee: u128,
}

impl SlowOrderResponse {
    /// Encode to canonical bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(17);
        buf.push(SLOW_ORDER_RESPONSE);
        buf.extend_from_slice(&self.base_fee.to_be_bytes());
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
        if discriminant != SLOW_ORDER_RESPONSE {
            return Err(SwiftfillError::MalformedPayload {
                reason: format!(
                    "expected slow order response discriminant, got 0x{discriminant:02X}"
                ),
            });
        }
        let response = Self {
            base_fee: reader.read_u128()?,
        };
        reader.finish()?;
        Ok(response)
    }
}
