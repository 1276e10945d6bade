//! # swiftfill-settlement
//!
//! Adapters between the auction engine and the two cross-chain transports
//! it settles over:
//!
//! - [`attestation`]: the attested messaging substrate — verification of
//!   inbound signed messages and publication of the engine's own, behind the
//!   [`MessageBus`] trait. [`MemoryBus`] is the in-process reference used
//!   for same-chain fast fills and by the test suites.
//! - [`rail`]: the canonical burn-and-mint transport behind the
//!   [`BurnMintRail`] trait, with the in-process [`MemoryRail`] reference.
//! - [`fastfill`]: the [`FastFillLedger`] replay guard — each fast fill
//!   digest is redeemable exactly once, forever.
//! - [`sink`]: the [`SettlementSink`] that picks the right transport per
//!   order: publish a fast fill on the local chain, burn for any other.

pub mod attestation;
pub mod fastfill;
pub mod rail;
pub mod sink;

pub use attestation::{MemoryBus, MessageBus, VerifiedMessage};
pub use fastfill::FastFillLedger;
pub use rail::{BurnMintRail, MemoryRail, OutboundTransfer, RedeemedTransfer};
pub use sink::SettlementSink;
