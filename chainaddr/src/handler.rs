//! The address handler contract.
//!
//! Every handler answers two questions about a piece of text: "can this be
//! interpreted as an address (or domain) on my blockchain?" and "what is the
//! canonical address?". Native handlers answer offline by decoding the text;
//! domain handlers resolve it through a name service and cache the result.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::address::Address;
use crate::blockchain::Blockchain;

/// Default bound on a single network resolution attempt of a domain handler.
pub const DEFAULT_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a handler decodes text locally or resolves it over the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Decodes the text with the blockchain's own encoding rules, no I/O.
    Native,
    /// Resolves a human-readable name through an external name service.
    Domain,
}

impl HandlerKind {
    /// Returns `true` if handlers of this kind perform network I/O.
    #[must_use]
    pub const fn requires_network(self) -> bool {
        matches!(self, Self::Domain)
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Domain => f.write_str("domain"),
        }
    }
}

/// A capability handler bound to exactly one blockchain.
///
/// # Contract
///
/// - [`can_accept`](Self::can_accept) never fails. Malformed input, checksum
///   mismatches, timeouts and resolver errors all yield `false`.
/// - [`produce`](Self::produce) may only be called for text that
///   `can_accept` just accepted on the same instance. Anything else is a
///   caller bug and panics.
///
/// [`try_resolve`](Self::try_resolve) performs both steps in one call and is
/// the preferred entry point.
#[async_trait]
pub trait AddressHandler: Send + Sync + fmt::Debug {
    /// Returns the blockchain this handler is bound to.
    fn blockchain(&self) -> Blockchain;

    /// Returns whether this handler works offline or over the network.
    fn kind(&self) -> HandlerKind;

    /// Returns `true` if `text` is an address or resolvable name on this handler's chain.
    async fn can_accept(&self, text: &str) -> bool;

    /// Produces the canonical address for `text`.
    ///
    /// # Panics
    ///
    /// Panics if `text` was not accepted by a preceding call to
    /// [`can_accept`](Self::can_accept) on this instance.
    fn produce(&self, text: &str) -> Address;

    /// Checks `text` and, if accepted, produces its canonical address.
    async fn try_resolve(&self, text: &str) -> Option<Address> {
        if self.can_accept(text).await {
            Some(self.produce(text))
        } else {
            None
        }
    }
}

/// Catch-all handler that accepts any text unchanged.
///
/// Must be registered after every other native handler of a chain, since it
/// masks everything registered after it.
#[derive(Debug, Clone, Copy)]
pub struct PureHandler {
    blockchain: Blockchain,
}

impl PureHandler {
    /// Creates a catch-all handler for `blockchain`.
    #[must_use]
    pub const fn new(blockchain: Blockchain) -> Self {
        Self { blockchain }
    }
}

#[async_trait]
impl AddressHandler for PureHandler {
    fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Native
    }

    async fn can_accept(&self, _text: &str) -> bool {
        true
    }

    fn produce(&self, text: &str) -> Address {
        Address::unvalidated(text, self.blockchain)
    }
}
