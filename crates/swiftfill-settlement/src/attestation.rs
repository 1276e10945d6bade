//! Attested messaging substrate seam.
//!
//! The substrate is external: something verifies guardian signatures and
//! hands over the parsed envelope. The engine only needs the two operations
//! in [`MessageBus`]. [`MemoryBus`] implements them in-process with the
//! same envelope and digest rules, which is all the local fast-fill path
//! and the test suites require.

use swiftfill_types::{Digest, Result, SwiftfillError, UniversalAddress};

/// A verified attested message, signature checks already done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedMessage {
    /// Chain the message was emitted on.
    pub emitter_chain: u16,
    /// Emitter address on that chain.
    pub emitter_address: UniversalAddress,
    /// Emitter-scoped sequence number.
    pub sequence: u64,
    /// Canonical digest; the auction primary key.
    pub digest: Digest,
    /// The application payload.
    pub payload: Vec<u8>,
}

/// Seam to the attested messaging substrate.
pub trait MessageBus {
    /// Verify a raw attested message and return its parsed envelope.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::InvalidMessage`] if verification fails.
    fn verify(&self, raw: &[u8]) -> Result<VerifiedMessage>;

    /// Publish a payload under this bus's own emitter identity. Returns the
    /// sequence number assigned to the message.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::InvalidMessage`] if the substrate refuses
    /// the payload.
    fn publish(&mut self, payload: Vec<u8>) -> Result<u64>;
}

// Envelope layout: emitter_chain (2) | emitter_address (32) | sequence (8)
// followed by the payload. Fixed forever; foreign fixtures build the same
// bytes.
const ENVELOPE_HEADER: usize = 42;

/// In-process reference substrate.
///
/// Owns one emitter identity (the engine's), assigns sequence numbers
/// monotonically, and keeps every published envelope so the local peer
/// router can pick fast fills up again.
#[derive(Debug)]
pub struct MemoryBus {
    chain: u16,
    emitter: UniversalAddress,
    next_sequence: u64,
    published: Vec<Vec<u8>>,
}

impl MemoryBus {
    /// Create a bus emitting as `emitter` on `chain`.
    #[must_use]
    pub fn new(chain: u16, emitter: UniversalAddress) -> Self {
        Self {
            chain,
            emitter,
            next_sequence: 0,
            published: Vec::new(),
        }
    }

    /// Build a raw attested message from a foreign emitter, e.g. a source
    /// chain's router. What a relayer would submit after observing it.
    #[must_use]
    pub fn attest_foreign(
        chain: u16,
        emitter: UniversalAddress,
        sequence: u64,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut raw = Vec::with_capacity(ENVELOPE_HEADER + payload.len());
        raw.extend_from_slice(&chain.to_be_bytes());
        raw.extend_from_slice(emitter.as_bytes());
        raw.extend_from_slice(&sequence.to_be_bytes());
        raw.extend_from_slice(payload);
        raw
    }

    /// All envelopes published so far, oldest first.
    #[must_use]
    pub fn published(&self) -> &[Vec<u8>] {
        &self.published
    }

    /// The most recently published envelope.
    #[must_use]
    pub fn last_published(&self) -> Option<&[u8]> {
        self.published.last().map(Vec::as_slice)
    }
}

impl MessageBus for MemoryBus {
    fn verify(&self, raw: &[u8]) -> Result<VerifiedMessage> {
        if raw.len() < ENVELOPE_HEADER {
            return Err(SwiftfillError::InvalidMessage {
                reason: format!("envelope too short: {} bytes", raw.len()),
            });
        }
        let emitter_chain = u16::from_be_bytes(raw[0..2].try_into().expect("2 bytes"));
        let emitter_address =
            UniversalAddress(raw[2..34].try_into().expect("32 bytes"));
        let sequence = u64::from_be_bytes(raw[34..42].try_into().expect("8 bytes"));
        let payload = raw[ENVELOPE_HEADER..].to_vec();
        let digest = Digest::of_message(emitter_chain, &emitter_address, sequence, &payload);
        Ok(VerifiedMessage {
            emitter_chain,
            emitter_address,
            sequence,
            digest,
            payload,
        })
    }

    fn publish(&mut self, payload: Vec<u8>) -> Result<u64> {
        let sequence = self.next_sequence;
        let raw = Self::attest_foreign(self.chain, self.emitter, sequence, &payload);
        tracing::debug!(
            chain = self.chain,
            emitter = %self.emitter,
            sequence,
            payload_len = payload.len(),
            "Message published"
        );
        self.published.push(raw);
        self.next_sequence += 1;
        Ok(sequence)
    }
}
