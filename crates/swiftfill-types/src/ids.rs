//! Identifiers used throughout swiftfill.
//!
//! The engine has exactly one primary key: the 32-byte digest the attested
//! messaging substrate assigns to a message. Accounts, routers, and emitters
//! are 32-byte universal addresses so that every chain's native address
//! format (20-byte EVM, 32-byte others) fits left-padded.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Canonical hash of an attested cross-chain message.
///
/// Serves double duty as replay protection and auction identity: the fast
/// and slow settlement paths for one order converge on the same digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Deterministic digest of an attested message.
    ///
    /// Every holder of the same `(emitter_chain, emitter_address, sequence,
    /// payload)` tuple computes the exact same digest, so independently
    /// observed copies of one message key the same auction.
    #[must_use]
    pub fn of_message(
        emitter_chain: u16,
        emitter_address: &UniversalAddress,
        sequence: u64,
        payload: &[u8],
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"swiftfill:message:v1:");
        hasher.update(emitter_chain.to_be_bytes());
        hasher.update(emitter_address.as_bytes());
        hasher.update(sequence.to_be_bytes());
        hasher.update(payload);
        Self(hasher.finalize().into())
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digest:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// UniversalAddress
// ---------------------------------------------------------------------------

/// A 32-byte cross-chain account, router, or emitter address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UniversalAddress(pub [u8; 32]);

impl UniversalAddress {
    /// The all-zero address. Never a valid router or recipient.
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for UniversalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
