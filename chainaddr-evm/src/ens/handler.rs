use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chainaddr::{
    Address, AddressHandler, Blockchain, DEFAULT_RESOLUTION_TIMEOUT, HandlerKind, ResolutionCache,
    ResolutionError,
};

use super::{EnsClient, is_name_shaped};

/// Domain handler resolving ENS names to addresses on one EVM chain.
///
/// Text that is not shaped like a name is rejected offline. Everything else
/// is resolved through the [`EnsClient`] once per handler instance; the
/// resolved value is stored as the client returned it.
#[derive(Debug)]
pub struct EnsHandler {
    blockchain: Blockchain,
    client: Arc<dyn EnsClient>,
    cache: ResolutionCache,
    timeout: Duration,
}

impl EnsHandler {
    /// Creates a handler bound to `blockchain` that resolves through `client`.
    #[must_use]
    pub fn new(blockchain: Blockchain, client: Arc<dyn EnsClient>) -> Self {
        Self {
            blockchain,
            client,
            cache: ResolutionCache::new(),
            timeout: DEFAULT_RESOLUTION_TIMEOUT,
        }
    }

    /// Sets the bound on one resolution attempt.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves `text`, keeping the failure reason.
    ///
    /// Shares the cache with [`can_accept`](AddressHandler::can_accept): a
    /// successful lookup makes a later [`produce`](AddressHandler::produce)
    /// valid.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidName`] for text that is not shaped
    /// like a name, [`ResolutionError::Timeout`] if the client does not answer
    /// in time, and the client's error otherwise.
    pub async fn lookup(&self, text: &str) -> Result<Address, ResolutionError> {
        if !is_name_shaped(text) {
            return Err(ResolutionError::InvalidName(text.to_owned()));
        }
        self.cache
            .get_or_resolve(text, || async {
                let resolved = tokio::time::timeout(self.timeout, self.client.resolve(text))
                    .await
                    .map_err(|_| ResolutionError::Timeout(self.timeout))??;
                Ok(Address::new(resolved, self.blockchain).with_domain(text))
            })
            .await
    }
}

#[async_trait]
impl AddressHandler for EnsHandler {
    fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Domain
    }

    async fn can_accept(&self, text: &str) -> bool {
        let result = self.lookup(text).await;
        #[cfg(feature = "telemetry")]
        if let Err(err) = &result {
            tracing::debug!(blockchain = %self.blockchain, name = text, error = %err, "ENS lookup failed");
        }
        result.is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        self.cache
            .get(text)
            .expect("produce called for text rejected by can_accept")
    }
}
