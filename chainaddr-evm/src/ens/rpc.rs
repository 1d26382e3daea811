//! JSON-RPC backed [`EnsClient`].
//!
//! Resolution is two `eth_call`s: `resolver(node)` on the registry, then
//! `addr(node)` on the returned resolver.

use std::time::Duration;

use alloy_primitives::{Address as EvmAddress, B256, hex};
use async_trait::async_trait;
use chainaddr::ResolutionError;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{EnsClient, namehash};
use crate::networks::{ADDR_SELECTOR, ENS_REGISTRY, RESOLVER_SELECTOR};

/// Configuration for [`RpcEnsClient`].
#[derive(Debug, Clone)]
pub struct RpcEnsConfig {
    /// JSON-RPC endpoint. Hosted providers carry the API key in the URL.
    pub rpc_url: Url,
    /// ENS registry contract.
    pub registry: EvmAddress,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Optional pre-configured reqwest client.
    pub http_client: Option<reqwest::Client>,
}

impl RpcEnsConfig {
    /// Creates a config for the mainnet registry behind `rpc_url`.
    #[must_use]
    pub const fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            registry: ENS_REGISTRY,
            timeout: Duration::from_secs(10),
            http_client: None,
        }
    }

    /// Sets the registry contract address.
    #[must_use]
    pub const fn with_registry(mut self, registry: EvmAddress) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// ENS client that queries the registry through an Ethereum JSON-RPC node.
#[derive(Debug, Clone)]
pub struct RpcEnsClient {
    rpc_url: Url,
    registry: EvmAddress,
    client: reqwest::Client,
}

impl RpcEnsClient {
    /// Creates a client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(config: RpcEnsConfig) -> Self {
        let client = config.http_client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("failed to build reqwest::Client")
        });
        Self {
            rpc_url: config.rpc_url,
            registry: config.registry,
            client,
        }
    }

    /// Returns the JSON-RPC endpoint.
    #[must_use]
    pub const fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Returns the resolver contract registered for `node`, if any.
    async fn resolver(&self, name: &str, node: B256) -> Result<EvmAddress, ResolutionError> {
        let resolver = self.call_address(self.registry, RESOLVER_SELECTOR, node).await?;
        if resolver.is_zero() {
            return Err(ResolutionError::not_found(name, "resolver"));
        }
        Ok(resolver)
    }

    /// Calls a `(bytes32) -> address` view function.
    async fn call_address(
        &self,
        to: EvmAddress,
        selector: [u8; 4],
        node: B256,
    ) -> Result<EvmAddress, ResolutionError> {
        let mut data = Vec::with_capacity(36);
        data.extend_from_slice(&selector);
        data.extend_from_slice(node.as_slice());

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": to.to_string(), "data": hex::encode_prefixed(&data) },
                "latest"
            ],
        });

        let response = self
            .client
            .post(self.rpc_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(ResolutionError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolutionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| ResolutionError::Malformed(format!("JSON-RPC response: {e}")))?;
        if let Some(error) = response.error {
            return Err(ResolutionError::Malformed(format!(
                "JSON-RPC error {}: {}",
                error.code, error.message
            )));
        }
        let result = response
            .result
            .ok_or_else(|| ResolutionError::Malformed("JSON-RPC response without result".into()))?;
        decode_address_word(&result)
    }
}

/// Decodes an ABI-encoded `address` return value.
fn decode_address_word(result: &str) -> Result<EvmAddress, ResolutionError> {
    let word = hex::decode(result.strip_prefix("0x").unwrap_or(result))
        .map_err(|e| ResolutionError::Malformed(format!("eth_call result: {e}")))?;
    if word.len() < 32 {
        return Err(ResolutionError::Malformed(format!(
            "eth_call result has {} bytes, expected 32",
            word.len()
        )));
    }
    Ok(EvmAddress::from_slice(&word[12..32]))
}

#[async_trait]
impl EnsClient for RpcEnsClient {
    async fn resolve(&self, name: &str) -> Result<String, ResolutionError> {
        let node = namehash(name);
        let resolver = self.resolver(name, node).await?;
        let address = self.call_address(resolver, ADDR_SELECTOR, node).await?;
        if address.is_zero() {
            return Err(ResolutionError::not_found(name, "addr"));
        }
        #[cfg(feature = "telemetry")]
        tracing::debug!(name, %resolver, %address, "ENS name resolved");
        Ok(address.to_checksum(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RESOLVER: &str = "231b0ee14048e9dccd1d247744d114a4eb5e8e63";
    const TARGET: &str = "d8da6bf26964af9d7eed9e03e53415d37aa96045";

    fn word(address_hex: &str) -> serde_json::Value {
        json!({ "jsonrpc": "2.0", "id": 1, "result": format!("0x{}{address_hex}", "0".repeat(24)) })
    }

    fn client(server: &MockServer) -> RpcEnsClient {
        RpcEnsClient::new(RpcEnsConfig::new(server.uri().parse().unwrap()))
    }

    #[tokio::test]
    async fn test_resolves_through_registry_and_resolver() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("0x0178b8bf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(word(RESOLVER)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("0x3b3b57de"))
            .and(body_string_contains("0x231b0Ee14048e9dCcD1d247744d114a4EB5E8E63"))
            .respond_with(ResponseTemplate::new(200).set_body_json(word(TARGET)))
            .expect(1)
            .mount(&server)
            .await;

        let resolved = client(&server).resolve("vitalik.eth").await.unwrap();
        assert_eq!(resolved, "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    }

    #[tokio::test]
    async fn test_missing_resolver_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("0x0178b8bf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(word(&"0".repeat(40))))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("0x3b3b57de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(word(TARGET)))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).resolve("nobody.eth").await.unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { ref record, .. } if record == "resolver"));
        assert!(err.is_definitive());
    }

    #[tokio::test]
    async fn test_zero_address_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("0x0178b8bf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(word(RESOLVER)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("0x3b3b57de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(word(&"0".repeat(40))))
            .mount(&server)
            .await;

        let err = client(&server).resolve("empty.eth").await.unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { ref record, .. } if record == "addr"));
    }

    #[tokio::test]
    async fn test_rpc_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client(&server).resolve("bob.eth").await.unwrap_err();
        assert!(matches!(err, ResolutionError::Status { status: 503, ref body } if body == "overloaded"));
        assert!(!err.is_definitive());
    }

    #[tokio::test]
    async fn test_rpc_error_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32000, "message": "execution reverted" }
            })))
            .mount(&server)
            .await;

        let err = client(&server).resolve("bob.eth").await.unwrap_err();
        assert!(matches!(err, ResolutionError::Malformed(ref msg) if msg.contains("execution reverted")));
    }

    #[test]
    fn test_decode_address_word() {
        let result = format!("0x{}{TARGET}", "0".repeat(24));
        assert_eq!(
            decode_address_word(&result).unwrap().to_checksum(None),
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        );
        assert!(decode_address_word("0x1234").is_err());
        assert!(decode_address_word("0xzz").is_err());
    }
}
