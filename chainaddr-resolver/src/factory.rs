//! Assembles resolution chains from the per-family handler crates.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address as EvmAddress;
use chainaddr::{AddressHandler, Blockchain, DEFAULT_RESOLUTION_TIMEOUT, ResolutionChain};
use chainaddr_evm::{EnsClient, EnsHandler, RpcEnsClient, RpcEnsConfig};
use chainaddr_http::{HttpUdnClient, UdnClient, UdnHandler};
use url::Url;

use crate::config::{ConfigError, ResolverConfig};

/// The set of blockchains a chain is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainScope {
    /// One known blockchain.
    Single(Blockchain),
    /// Several blockchains, checked in the given order.
    Many(Vec<Blockchain>),
    /// Every supported blockchain, used when the chain is unknown.
    All,
}

impl ChainScope {
    /// Returns the blockchains in scope, in match order.
    #[must_use]
    pub fn blockchains(&self) -> Vec<Blockchain> {
        match self {
            Self::Single(blockchain) => vec![*blockchain],
            Self::Many(blockchains) => blockchains.clone(),
            Self::All => Blockchain::ALL.to_vec(),
        }
    }
}

impl From<Vec<Blockchain>> for ChainScope {
    fn from(blockchains: Vec<Blockchain>) -> Self {
        match blockchains.as_slice() {
            [] => Self::All,
            [blockchain] => Self::Single(*blockchain),
            _ => Self::Many(blockchains),
        }
    }
}

/// Builds handlers and resolution chains for any supported blockchain.
///
/// Native handlers are always available. Domain handlers are built only for
/// the name services a client has been configured for.
#[derive(Clone)]
pub struct HandlerFactory {
    ens: Option<Arc<dyn EnsClient>>,
    udn: Option<Arc<dyn UdnClient>>,
    coin_codes: BTreeMap<Blockchain, String>,
    include_domains: bool,
    timeout: Duration,
}

impl fmt::Debug for HandlerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFactory")
            .field("ens", &self.ens.is_some())
            .field("udn", &self.udn.is_some())
            .field("coin_codes", &self.coin_codes)
            .field("include_domains", &self.include_domains)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for HandlerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerFactory {
    /// Creates a factory that builds native handlers only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ens: None,
            udn: None,
            coin_codes: BTreeMap::new(),
            include_domains: false,
            timeout: DEFAULT_RESOLUTION_TIMEOUT,
        }
    }

    /// Builds a factory with the name-service clients described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a configured URL or registry address is
    /// invalid, or the registry client cannot be built.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        let timeout = config.timeout();
        let mut factory = Self::new().with_timeout(timeout);

        if let Some(ens) = &config.ens {
            let rpc_url: Url = ens.rpc_url.parse().map_err(|source| ConfigError::Url {
                context: "ens.rpc_url",
                source,
            })?;
            let mut ens_config = RpcEnsConfig::new(rpc_url).with_timeout(timeout);
            if let Some(registry) = &ens.registry {
                let registry: EvmAddress = registry
                    .parse()
                    .map_err(|_| ConfigError::Registry(registry.clone()))?;
                ens_config = ens_config.with_registry(registry);
            }
            factory = factory.with_ens_client(Arc::new(RpcEnsClient::new(ens_config)));
        }

        if let Some(udn) = &config.udn {
            let base_url: Url = udn.base_url.parse().map_err(|source| ConfigError::Url {
                context: "udn.base_url",
                source,
            })?;
            let mut client = HttpUdnClient::try_new(base_url)?;
            if let Some(api_key) = &udn.api_key {
                client = client.with_api_key(api_key.clone());
            }
            factory = factory.with_udn_client(Arc::new(client));
        }

        for (blockchain, coin_code) in &config.coins {
            factory = factory.with_coin_code(*blockchain, coin_code.clone());
        }

        tracing::debug!(?factory, "Handler factory configured");
        Ok(factory)
    }

    /// Enables ENS handlers for EVM chains.
    #[must_use]
    pub fn with_ens_client(mut self, client: Arc<dyn EnsClient>) -> Self {
        self.ens = Some(client);
        self
    }

    /// Enables universal registry handlers for every chain.
    #[must_use]
    pub fn with_udn_client(mut self, client: Arc<dyn UdnClient>) -> Self {
        self.udn = Some(client);
        self
    }

    /// Sets the token coin code looked up for `blockchain` in scoped chains.
    #[must_use]
    pub fn with_coin_code(mut self, blockchain: Blockchain, coin_code: impl Into<String>) -> Self {
        self.coin_codes.insert(blockchain, coin_code.into());
        self
    }

    /// Sets whether [`chain_for_scope`](Self::chain_for_scope) adds domain handlers.
    #[must_use]
    pub const fn include_domains(mut self, include_domains: bool) -> Self {
        self.include_domains = include_domains;
        self
    }

    /// Sets the per-request timeout of domain handlers.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the native handlers of `blockchain` in match order.
    #[must_use]
    pub fn native_handlers(&self, blockchain: Blockchain) -> Vec<Box<dyn AddressHandler>> {
        let mut handlers = chainaddr_utxo::native_handlers(blockchain);
        handlers.extend(chainaddr_evm::native_handlers(blockchain));
        handlers.extend(chainaddr_account::native_handlers(blockchain));
        handlers
    }

    /// Returns the domain handlers of `blockchain`, ENS first.
    ///
    /// `coin_code` names the token looked up in the universal registry.
    #[must_use]
    pub fn domain_handlers(
        &self,
        blockchain: Blockchain,
        coin_code: Option<&str>,
    ) -> Vec<Box<dyn AddressHandler>> {
        let mut handlers: Vec<Box<dyn AddressHandler>> = Vec::new();
        if let Some(ens) = &self.ens
            && blockchain.is_evm()
        {
            handlers.push(Box::new(
                EnsHandler::new(blockchain, Arc::clone(ens)).with_timeout(self.timeout),
            ));
        }
        if let Some(udn) = &self.udn {
            handlers.push(Box::new(
                UdnHandler::new(blockchain, coin_code.map(str::to_owned), Arc::clone(udn))
                    .with_timeout(self.timeout),
            ));
        }
        handlers
    }

    /// Builds the chain of one blockchain: natives, then domains.
    #[must_use]
    pub fn chain_for(&self, blockchain: Blockchain, coin_code: Option<&str>) -> ResolutionChain {
        let mut chain: ResolutionChain = self.native_handlers(blockchain).into();
        for handler in self.domain_handlers(blockchain, coin_code) {
            chain.append(handler);
        }
        chain
    }

    /// Builds one chain covering every blockchain in `scope`.
    ///
    /// Domain handlers are added only when enabled through
    /// [`include_domains`](Self::include_domains), each with the coin code
    /// configured for its blockchain.
    #[must_use]
    pub fn chain_for_scope(&self, scope: &ChainScope) -> ResolutionChain {
        let blockchains = scope.blockchains();
        let mut chain = ResolutionChain::new();
        for blockchain in &blockchains {
            chain.extend(self.native_handlers(*blockchain).into());
        }
        if self.include_domains {
            for blockchain in &blockchains {
                let coin_code = self.coin_codes.get(blockchain).map(String::as_str);
                chain.extend(self.domain_handlers(*blockchain, coin_code).into());
            }
        }
        tracing::debug!(
            blockchains = blockchains.len(),
            handlers = chain.len(),
            "Built resolution chain"
        );
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chainaddr::{Address, HandlerKind, ResolutionError, ScriptType};

    #[derive(Debug)]
    struct FixedEnsClient;

    #[async_trait]
    impl EnsClient for FixedEnsClient {
        async fn resolve(&self, name: &str) -> Result<String, ResolutionError> {
            match name {
                "bob.eth" => Ok("0xABCDEF0123456789ABCDEF0123456789ABCDEF01".to_owned()),
                _ => Err(ResolutionError::not_found(name, "addr")),
            }
        }
    }

    #[derive(Debug)]
    struct FixedUdnClient;

    #[async_trait]
    impl UdnClient for FixedUdnClient {
        async fn resolve(
            &self,
            name: &str,
            coin_code: &str,
            chain: Option<&str>,
        ) -> Result<String, ResolutionError> {
            match (name, coin_code, chain) {
                ("brad.crypto", "USDT", Some("TRON")) => {
                    Ok("TLmntVi9ScSKwrpG7WJX7ZoEVrneWgoHFH".to_owned())
                }
                _ => Err(ResolutionError::not_found(name, coin_code)),
            }
        }
    }

    fn with_domains() -> HandlerFactory {
        HandlerFactory::new()
            .with_ens_client(Arc::new(FixedEnsClient))
            .with_udn_client(Arc::new(FixedUdnClient))
    }

    #[test]
    fn test_native_handler_families() {
        let factory = HandlerFactory::new();
        let counts = [
            (Blockchain::Bitcoin, 2),
            (Blockchain::Litecoin, 2),
            (Blockchain::BitcoinCash, 2),
            (Blockchain::ECash, 2),
            (Blockchain::Dash, 1),
            (Blockchain::Dogecoin, 1),
            (Blockchain::Ethereum, 1),
            (Blockchain::Polygon, 1),
            (Blockchain::Solana, 1),
            (Blockchain::Tron, 1),
            (Blockchain::Ton, 1),
            (Blockchain::Stellar, 1),
            (Blockchain::Monero, 1),
            (Blockchain::Zcash, 1),
        ];
        for (blockchain, count) in counts {
            let handlers = factory.native_handlers(blockchain);
            assert_eq!(handlers.len(), count, "{blockchain}");
            assert!(handlers.iter().all(|h| h.blockchain() == blockchain));
            assert!(handlers.iter().all(|h| h.kind() == HandlerKind::Native));
        }
        for blockchain in Blockchain::ALL {
            assert!(!factory.native_handlers(*blockchain).is_empty(), "{blockchain}");
        }
    }

    #[test]
    fn test_domain_handlers_need_clients() {
        assert!(HandlerFactory::new().domain_handlers(Blockchain::Ethereum, None).is_empty());

        let factory = with_domains();
        assert_eq!(factory.domain_handlers(Blockchain::Ethereum, None).len(), 2);
        assert_eq!(factory.domain_handlers(Blockchain::Bitcoin, None).len(), 1);
        assert!(
            factory
                .domain_handlers(Blockchain::Ethereum, None)
                .iter()
                .all(|h| h.kind() == HandlerKind::Domain)
        );
    }

    #[test]
    fn test_scope_union_counts() {
        let factory = with_domains();
        let natives: usize = Blockchain::ALL
            .iter()
            .map(|b| factory.native_handlers(*b).len())
            .sum();

        assert_eq!(factory.chain_for_scope(&ChainScope::All).len(), natives);

        let evm = Blockchain::ALL.iter().filter(|b| b.is_evm()).count();
        let with_domains = factory.clone().include_domains(true);
        assert_eq!(
            with_domains.chain_for_scope(&ChainScope::All).len(),
            natives + Blockchain::ALL.len() + evm
        );

        let many = ChainScope::Many(vec![Blockchain::Bitcoin, Blockchain::Dash]);
        assert_eq!(factory.chain_for_scope(&many).len(), 3);
    }

    #[test]
    fn test_scope_from_blockchains() {
        assert_eq!(ChainScope::from(Vec::new()), ChainScope::All);
        assert_eq!(
            ChainScope::from(vec![Blockchain::Tron]),
            ChainScope::Single(Blockchain::Tron)
        );
        assert_eq!(ChainScope::All.blockchains().len(), Blockchain::ALL.len());
    }

    #[tokio::test]
    async fn test_bitcoin_legacy_address() {
        let chain = HandlerFactory::new().chain_for_scope(&ChainScope::Single(Blockchain::Bitcoin));
        let text = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

        let handler = chain.first_match(text).await.unwrap();
        assert_eq!(handler.kind(), HandlerKind::Native);
        let address = handler.produce(text);
        assert_eq!(address.script_type(), Some(ScriptType::P2pkh));
        assert_eq!(address.blockchain(), Blockchain::Bitcoin);
    }

    #[tokio::test]
    async fn test_bitcoin_segwit_address() {
        let chain = HandlerFactory::new().chain_for_scope(&ChainScope::Single(Blockchain::Bitcoin));
        let address = chain
            .resolve("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq")
            .await
            .unwrap();
        assert_eq!(address.script_type(), Some(ScriptType::P2wpkh));
    }

    #[tokio::test]
    async fn test_unmatched_text_falls_back_to_unvalidated() {
        let chain = HandlerFactory::new().chain_for_scope(&ChainScope::Single(Blockchain::Bitcoin));
        let text = "not-a-real-address";

        assert!(chain.first_match(text).await.is_none());
        let address = chain.resolve_or_unvalidated(text, Blockchain::Bitcoin).await;
        assert_eq!(address, Address::unvalidated(text, Blockchain::Bitcoin));
    }

    #[tokio::test]
    async fn test_unknown_chain_scan_finds_tron() {
        let chain = HandlerFactory::new().chain_for_scope(&ChainScope::All);
        let text = "TLmntVi9ScSKwrpG7WJX7ZoEVrneWgoHFH";

        let mut accepting = Vec::new();
        for handler in chain.handlers() {
            if handler.can_accept(text).await {
                accepting.push(handler.blockchain());
            }
        }
        assert_eq!(accepting, vec![Blockchain::Tron]);
    }

    #[tokio::test]
    async fn test_domains_resolve_after_natives() {
        let factory = with_domains();

        let chain = factory.chain_for(Blockchain::Ethereum, None);
        let address = chain.resolve("bob.eth").await.unwrap();
        assert_eq!(address.source_domain(), Some("bob.eth"));
        assert_eq!(address.resolved_value(), "0xABCDEF0123456789ABCDEF0123456789ABCDEF01");

        let native = chain
            .first_match("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .await
            .unwrap();
        assert_eq!(native.kind(), HandlerKind::Native);
    }

    #[tokio::test]
    async fn test_scoped_coin_codes_reach_registry() {
        let factory = with_domains()
            .include_domains(true)
            .with_coin_code(Blockchain::Tron, "USDT");
        let chain = factory.chain_for_scope(&ChainScope::Many(vec![Blockchain::Ethereum, Blockchain::Tron]));

        let address = chain.resolve("brad.crypto").await.unwrap();
        assert_eq!(address.blockchain(), Blockchain::Tron);
        assert_eq!(address.source_domain(), Some("brad.crypto"));
    }

    #[test]
    fn test_from_config() {
        let config = ResolverConfig::parse_with(
            r#"
                [ens]
                rpc_url = "https://rpc.example/"

                [udn]
                api_key = "key"

                [coins]
                tron = "USDT"
            "#,
            |_| None,
        )
        .unwrap();
        let factory = HandlerFactory::from_config(&config).unwrap();
        assert_eq!(factory.domain_handlers(Blockchain::Ethereum, None).len(), 2);
        assert_eq!(factory.coin_codes.get(&Blockchain::Tron).map(String::as_str), Some("USDT"));
    }

    #[test]
    fn test_from_config_rejects_bad_values() {
        let bad_url = ResolverConfig::parse_with("[ens]\nrpc_url = \"not a url\"", |_| None).unwrap();
        assert!(matches!(
            HandlerFactory::from_config(&bad_url),
            Err(ConfigError::Url { context: "ens.rpc_url", .. })
        ));

        let bad_registry = ResolverConfig::parse_with(
            "[ens]\nrpc_url = \"https://rpc.example/\"\nregistry = \"0x1234\"",
            |_| None,
        )
        .unwrap();
        assert!(matches!(
            HandlerFactory::from_config(&bad_registry),
            Err(ConfigError::Registry(_))
        ));
    }
}
