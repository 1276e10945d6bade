//! # swiftfill-wire
//!
//! Canonical byte payload codec for the four cross-chain message types the
//! engine exchanges:
//!
//! | Discriminant | Message |
//! |---|---|
//! | `0x11` | [`FastMarketOrder`] — the presigned order opening an auction |
//! | `0x14` | [`SlowOrderResponse`] — the finalized transfer's fee notice |
//! | `0x01` | [`Fill`] — settlement instruction for the destination router |
//! | `0x0C` | [`FastFill`] — same-chain settlement carrying its amount |
//!
//! All integers are big-endian. Every payload starts with a one-byte
//! discriminant and decodes with strict length checks; trailing bytes are
//! rejected. Discriminant values are fixed forever — routers on other
//! chains parse these bytes.

pub mod fast_fill;
pub mod fast_market_order;
pub mod fill;
pub mod reader;
pub mod slow_order_response;

pub use fast_fill::FastFill;
pub use fast_market_order::FastMarketOrder;
pub use fill::Fill;
pub use reader::ByteReader;
pub use slow_order_response::SlowOrderResponse;

use swiftfill_types::{Result, SwiftfillError};

/// Discriminant for [`Fill`].
pub const FILL: u8 = 0x01;
/// Discriminant for [`FastFill`].
pub const FAST_FILL: u8 = 0x0C;
/// Discriminant for [`FastMarketOrder`].
pub const FAST_MARKET_ORDER: u8 = 0x11;
/// Discriminant for [`SlowOrderResponse`].
pub const SLOW_ORDER_RESPONSE: u8 = 0x14;

/// Any decodable payload, dispatched on the leading discriminant byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    FastMarketOrder(FastMarketOrder),
    SlowOrderResponse(SlowOrderResponse),
    Fill(Fill),
    FastFill(FastFill),
}

impl Payload {
    /// Decode any known payload.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::MalformedPayload`] on an empty buffer,
    /// unknown discriminant, length mismatch, or trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            Some(&FAST_MARKET_ORDER) => {
                FastMarketOrder::decode(bytes).map(Self::FastMarketOrder)
            }
            Some(&SLOW_ORDER_RESPONSE) => {
                SlowOrderResponse::decode(bytes).map(Self::SlowOrderResponse)
            }
            Some(&FILL) => Fill::decode(bytes).map(Self::Fill),
            Some(&FAST_FILL) => FastFill::decode(bytes).map(Self::FastFill),
            Some(&other) => Err(SwiftfillError::MalformedPayload {
                reason: format!("unknown discriminant 0x{other:02X}"),
            }),
            None => Err(SwiftfillError::MalformedPayload {
                reason: "empty payload".to_string(),
            }),
        }
    }

    /// Encode back to canonical bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::FastMarketOrder(order) => order.encode(),
            Self::SlowOrderResponse(response) => response.encode(),
            Self::Fill(fill) => fill.encode(),
            Self::FastFill(fast_fill) => fast_fill.encode(),
        }
    }
}
