//! System-wide constants for the swiftfill matching engine.

/// Fixed-point denominator for rates: `1_000_000` = 100%.
pub const MAX_BPS: u32 = 1_000_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "swiftfill";
