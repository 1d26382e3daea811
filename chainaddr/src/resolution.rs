//! Prioritized dispatch over a set of address handlers.
//!
//! A [`ResolutionChain`] keeps its handlers in one registration-ordered list,
//! each tagged with its [`HandlerKind`]. Lookups check every native handler
//! first and only then the domain handlers, so offline checks are never stuck
//! behind network round-trips. Within each kind, registration order wins.

use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::address::Address;
use crate::blockchain::Blockchain;
use crate::handler::{AddressHandler, HandlerKind};

/// Ordered set of handlers evaluated with first-match-wins semantics.
///
/// Probing is strictly sequential: once a handler accepts, later handlers are
/// not asked.
#[derive(Default)]
pub struct ResolutionChain(Vec<Box<dyn AddressHandler>>);

impl Debug for ResolutionChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let handlers: Vec<String> = self
            .0
            .iter()
            .map(|h| format!("{}:{}", h.blockchain(), h.kind()))
            .collect();
        f.debug_tuple("ResolutionChain").field(&handlers).finish()
    }
}

impl ResolutionChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a handler after every handler already registered.
    pub fn append(&mut self, handler: Box<dyn AddressHandler>) {
        self.0.push(handler);
    }

    /// Builder-style method: appends a handler and returns `self`.
    #[must_use]
    pub fn with(mut self, handler: impl AddressHandler + 'static) -> Self {
        self.append(Box::new(handler));
        self
    }

    /// Moves every handler of `other` to the end of this chain, keeping their order.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the handlers in match order: natives, then domains.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn AddressHandler> {
        self.of_kind(HandlerKind::Native)
            .chain(self.of_kind(HandlerKind::Domain))
    }

    fn of_kind(&self, kind: HandlerKind) -> impl Iterator<Item = &dyn AddressHandler> {
        self.0
            .iter()
            .map(|h| &**h)
            .filter(move |h| h.kind() == kind)
    }

    /// Returns the first handler that accepts `text`, if any.
    pub async fn first_match(&self, text: &str) -> Option<&dyn AddressHandler> {
        for handler in self.handlers() {
            if handler.can_accept(text).await {
                #[cfg(feature = "telemetry")]
                tracing::debug!(
                    blockchain = %handler.blockchain(),
                    kind = %handler.kind(),
                    "Handler accepted input"
                );
                return Some(handler);
            }
        }
        #[cfg(feature = "telemetry")]
        tracing::debug!(handlers = self.len(), "No handler accepted input");
        None
    }

    /// Resolves `text` with the first accepting handler.
    pub async fn resolve(&self, text: &str) -> Option<Address> {
        let handler = self.first_match(text).await?;
        Some(handler.produce(text))
    }

    /// Resolves `text`, falling back to an unvalidated address on `blockchain`
    /// when no handler accepts it.
    pub async fn resolve_or_unvalidated(&self, text: &str, blockchain: Blockchain) -> Address {
        match self.resolve(text).await {
            Some(address) => address,
            None => Address::unvalidated(text, blockchain),
        }
    }
}

impl From<Vec<Box<dyn AddressHandler>>> for ResolutionChain {
    fn from(handlers: Vec<Box<dyn AddressHandler>>) -> Self {
        Self(handlers)
    }
}
