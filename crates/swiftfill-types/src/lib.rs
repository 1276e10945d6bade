//! # swiftfill-types
//!
//! Shared types, errors, and configuration for the **swiftfill** matching
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Digest`], [`UniversalAddress`]
//! - **Auction model**: [`Auction`], [`AuctionStatus`]
//! - **Token ledger**: [`TokenLedger`] — the settlement-asset account book
//! - **Block environment**: [`BlockEnv`] — height and wall clock at apply time
//! - **Configuration**: [`AuctionParameters`]
//! - **Events**: [`AuctionStarted`], [`NewBid`], [`BidOutcome`]
//! - **Errors**: [`SwiftfillError`] with `SF_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod auction;
pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod event;
pub mod ids;
pub mod ledger;

// Re-export all primary types at crate root for ergonomic imports:
//   use swiftfill_types::{Auction, AuctionStatus, Digest, TokenLedger, ...};

pub use auction::*;
pub use config::*;
pub use env::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use ledger::*;

// Constants are accessed via `swiftfill_types::constants::FOO`
// (not re-exported to avoid name collisions).
