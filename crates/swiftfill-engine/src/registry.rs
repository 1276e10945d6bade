//! Router endpoint registry.
//!
//! Authoritative map from chain id to the token router address on that
//! chain. Inbound messages are accepted only from a chain's registered
//! router; outbound transfers are addressed to the target chain's. The
//! local chain's entry, when set, names the peer router that alone may
//! redeem fast fills.

use std::collections::HashMap;

use swiftfill_types::{Result, SwiftfillError, UniversalAddress};

/// `chain → router` map with admission checks.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<u16, UniversalAddress>,
}

impl EndpointRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoints: HashMap::new(),
        }
    }

    /// Register (or replace) the router for a chain.
    ///
    /// # Errors
    /// - [`SwiftfillError::ChainNotAllowed`] for chain id 0
    /// - [`SwiftfillError::InvalidEndpoint`] for the zero address
    pub fn add_endpoint(&mut self, chain: u16, router: UniversalAddress) -> Result<()> {
        if chain == 0 {
            return Err(SwiftfillError::ChainNotAllowed);
        }
        if router.is_zero() {
            return Err(SwiftfillError::InvalidEndpoint);
        }
        let replaced = self.endpoints.insert(chain, router);
        tracing::info!(chain, router = %router, replaced = replaced.is_some(), "Endpoint registered");
        Ok(())
    }

    /// The registered router for a chain, if any.
    #[must_use]
    pub fn endpoint_of(&self, chain: u16) -> Option<UniversalAddress> {
        self.endpoints.get(&chain).copied()
    }

    /// Number of registered chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether no chain is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
