//! Multi-strategy domain handler for the universal registry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chainaddr::{
    Address, AddressHandler, Blockchain, DEFAULT_RESOLUTION_TIMEOUT, HandlerKind, ResolutionCache,
    ResolutionError,
};

use crate::client::UdnClient;

/// One `(coin code, chain hint)` query against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Strategy {
    coin_code: String,
    chain: Option<&'static str>,
}

/// Domain handler resolving universal-registry domains on one blockchain.
///
/// A domain can carry several records for the same chain: a token record
/// scoped to the chain, a token record without scope, and the record of the
/// chain's native coin. They are tried in that order, each under its own
/// timeout, and the first non-empty address wins.
#[derive(Debug)]
pub struct UdnHandler {
    blockchain: Blockchain,
    coin_code: Option<String>,
    client: Arc<dyn UdnClient>,
    cache: ResolutionCache,
    timeout: Duration,
}

impl UdnHandler {
    /// Creates a handler bound to `blockchain` that resolves through `client`.
    ///
    /// `coin_code` names the token the caller is interested in; without it
    /// only the chain's native coin record is consulted.
    #[must_use]
    pub fn new(blockchain: Blockchain, coin_code: Option<String>, client: Arc<dyn UdnClient>) -> Self {
        Self {
            blockchain,
            coin_code,
            client,
            cache: ResolutionCache::new(),
            timeout: DEFAULT_RESOLUTION_TIMEOUT,
        }
    }

    /// Sets the bound on each strategy's request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the token coin code this handler looks up, if any.
    #[must_use]
    pub fn coin_code(&self) -> Option<&str> {
        self.coin_code.as_deref()
    }

    /// Queries in the order they are tried, consecutive duplicates removed.
    fn strategies(&self) -> Vec<Strategy> {
        let mut strategies = Vec::with_capacity(3);
        if let Some(coin_code) = &self.coin_code {
            if let Some(hint) = self.blockchain.multichain_hint() {
                strategies.push(Strategy {
                    coin_code: coin_code.clone(),
                    chain: Some(hint),
                });
            }
            strategies.push(Strategy {
                coin_code: coin_code.clone(),
                chain: None,
            });
        }
        strategies.push(Strategy {
            coin_code: self.blockchain.coin_code().to_owned(),
            chain: None,
        });
        strategies.dedup();
        strategies
    }

    async fn run(&self, name: &str, strategy: &Strategy) -> Result<String, ResolutionError> {
        let address = tokio::time::timeout(
            self.timeout,
            self.client.resolve(name, &strategy.coin_code, strategy.chain),
        )
        .await
        .map_err(|_| ResolutionError::Timeout(self.timeout))??;
        if address.trim().is_empty() {
            return Err(ResolutionError::not_found(name, &strategy.coin_code));
        }
        Ok(address)
    }

    async fn resolve_uncached(&self, name: &str) -> Result<Address, ResolutionError> {
        let mut last_error = None;
        for strategy in self.strategies() {
            match self.run(name, &strategy).await {
                Ok(address) => {
                    #[cfg(feature = "telemetry")]
                    tracing::debug!(
                        blockchain = %self.blockchain,
                        name,
                        coin = %strategy.coin_code,
                        chain = ?strategy.chain,
                        "Domain resolved"
                    );
                    return Ok(Address::new(address, self.blockchain).with_domain(name));
                }
                Err(err) => {
                    #[cfg(feature = "telemetry")]
                    tracing::trace!(
                        name,
                        coin = %strategy.coin_code,
                        chain = ?strategy.chain,
                        error = %err,
                        "Strategy failed"
                    );
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| ResolutionError::not_found(name, self.blockchain.coin_code())))
    }

    /// Resolves `text`, keeping the failure reason.
    ///
    /// Shares the cache with [`can_accept`](AddressHandler::can_accept).
    ///
    /// # Errors
    ///
    /// Returns the error of the last strategy tried. Any text is sent to the
    /// registry; there is no offline name check.
    pub async fn lookup(&self, text: &str) -> Result<Address, ResolutionError> {
        self.cache
            .get_or_resolve(text, || self.resolve_uncached(text))
            .await
    }
}

#[async_trait]
impl AddressHandler for UdnHandler {
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
            tracing::debug!(blockchain = %self.blockchain, name = text, error = %err, "Domain lookup failed");
        }
        result.is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        self.cache
            .get(text)
            .expect("produce called for text rejected by can_accept")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Query = (String, Option<String>);

    /// In-memory registry recording every query.
    #[derive(Debug, Default)]
    struct MockUdnClient {
        records: HashMap<Query, &'static str>,
        slow: Option<(Query, Duration)>,
        queries: Arc<Mutex<Vec<Query>>>,
    }

    fn query(coin: &str, chain: Option<&str>) -> Query {
        (coin.to_owned(), chain.map(str::to_owned))
    }

    impl MockUdnClient {
        fn with(mut self, coin: &str, chain: Option<&str>, address: &'static str) -> Self {
            self.records.insert(query(coin, chain), address);
            self
        }
    }

    #[async_trait]
    impl UdnClient for MockUdnClient {
        async fn resolve(
            &self,
            name: &str,
            coin_code: &str,
            chain: Option<&str>,
        ) -> Result<String, ResolutionError> {
            let key = query(coin_code, chain);
            self.queries.lock().unwrap().push(key.clone());
            if let Some((slow, delay)) = &self.slow
                && *slow == key
            {
                tokio::time::sleep(*delay).await;
            }
            self.records
                .get(&key)
                .map(|address| (*address).to_owned())
                .ok_or_else(|| ResolutionError::not_found(name, coin_code))
        }
    }

    const POLYGON_ADDRESS: &str = "0x8aaD44321A86b170879d7A244c1e8d360c99DdA8";

    fn handler(
        blockchain: Blockchain,
        coin: Option<&str>,
        client: MockUdnClient,
    ) -> (UdnHandler, Arc<Mutex<Vec<Query>>>) {
        let queries = Arc::clone(&client.queries);
        let handler = UdnHandler::new(blockchain, coin.map(str::to_owned), Arc::new(client));
        (handler, queries)
    }

    #[tokio::test]
    async fn test_falls_back_to_native_coin_record() {
        let client = MockUdnClient::default().with("MATIC", None, POLYGON_ADDRESS);
        let (handler, queries) = handler(Blockchain::Polygon, Some("USDT"), client);

        assert!(handler.can_accept("brad.crypto").await);
        let address = handler.produce("brad.crypto");
        assert_eq!(address.resolved_value(), POLYGON_ADDRESS);
        assert_eq!(address.source_domain(), Some("brad.crypto"));
        assert_eq!(address.blockchain(), Blockchain::Polygon);

        assert_eq!(
            *queries.lock().unwrap(),
            vec![
                query("USDT", Some("MATIC")),
                query("USDT", None),
                query("MATIC", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_first_strategy_wins() {
        let client = MockUdnClient::default()
            .with("USDT", Some("TRON"), "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL")
            .with("TRX", None, "TLmntVi9ScSKwrpG7WJX7ZoEVrneWgoHFH");
        let (handler, queries) = handler(Blockchain::Tron, Some("USDT"), client);

        let address = handler.try_resolve("brad.crypto").await.unwrap();
        assert_eq!(address.resolved_value(), "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL");
        assert_eq!(queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_all_strategies_fail() {
        let (handler, queries) = handler(Blockchain::Polygon, Some("USDT"), MockUdnClient::default());

        assert!(!handler.can_accept("nobody.crypto").await);
        let err = handler.lookup("nobody.crypto").await.unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { ref record, .. } if record == "MATIC"));
        assert_eq!(queries.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_identical_strategies_tried_once() {
        let (handler, queries) = handler(Blockchain::Optimism, Some("ETH"), MockUdnClient::default());

        assert!(!handler.can_accept("nobody.crypto").await);
        assert_eq!(
            *queries.lock().unwrap(),
            vec![query("ETH", Some("OP")), query("ETH", None)]
        );
    }

    #[tokio::test]
    async fn test_without_coin_code_uses_native_coin() {
        let client = MockUdnClient::default().with("BTC", None, "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq");
        let (handler, queries) = handler(Blockchain::Bitcoin, None, client);

        assert!(handler.can_accept("brad.crypto").await);
        assert_eq!(*queries.lock().unwrap(), vec![query("BTC", None)]);
    }

    #[tokio::test]
    async fn test_empty_address_falls_through() {
        let client = MockUdnClient::default()
            .with("USDT", Some("ERC20"), "")
            .with("USDT", None, POLYGON_ADDRESS);
        let (handler, _) = handler(Blockchain::Ethereum, Some("USDT"), client);

        let address = handler.lookup("brad.crypto").await.unwrap();
        assert_eq!(address.resolved_value(), POLYGON_ADDRESS);
    }

    #[tokio::test]
    async fn test_each_strategy_has_its_own_timeout() {
        let client = MockUdnClient {
            slow: Some((query("USDT", Some("MATIC")), Duration::from_secs(5))),
            ..MockUdnClient::default().with("MATIC", None, POLYGON_ADDRESS)
        };
        let (handler, queries) = handler(Blockchain::Polygon, Some("USDT"), client);
        let handler = handler.with_timeout(Duration::from_millis(50));

        let address = handler.lookup("brad.crypto").await.unwrap();
        assert_eq!(address.resolved_value(), POLYGON_ADDRESS);
        assert_eq!(queries.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_success_is_cached() {
        let client = MockUdnClient::default().with("MATIC", None, POLYGON_ADDRESS);
        let (handler, queries) = handler(Blockchain::Polygon, None, client);

        for _ in 0..3 {
            assert!(handler.can_accept("brad.crypto").await);
        }
        assert_eq!(queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_any_text_reaches_the_registry() {
        let client = MockUdnClient::default().with("ETH", None, POLYGON_ADDRESS);
        let (handler, queries) = handler(Blockchain::Ethereum, None, client);

        assert!(handler.can_accept("brad").await);
        assert_eq!(handler.produce("brad").resolved_value(), POLYGON_ADDRESS);
        assert_eq!(*queries.lock().unwrap(), vec![query("ETH", None)]);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (handler, queries) = handler(Blockchain::Bitcoin, None, MockUdnClient::default());

        assert!(!handler.can_accept("brad .crypto").await);
        assert!(!handler.can_accept("brad .crypto").await);
        assert_eq!(queries.lock().unwrap().len(), 2);
    }

    #[test]
    #[should_panic(expected = "rejected by can_accept")]
    fn test_produce_without_accept_panics() {
        let (handler, _) = handler(Blockchain::Polygon, None, MockUdnClient::default());
        let _ = handler.produce("brad.crypto");
    }
}
