//! Universal domain registry client.
//!
//! Provides the [`UdnClient`] seam used by [`UdnHandler`](crate::UdnHandler)
//! and [`HttpUdnClient`], which resolves names through the registry's REST
//! API: `GET {base}/resolve/domains/{name}` with a bearer API key, answered
//! by a JSON object whose `records` map holds one address per record key.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chainaddr::ResolutionError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::constants::{DEFAULT_UDN_URL, DOMAINS_PATH, record_key};

/// Resolves a domain to an address for one coin, optionally on one chain.
#[async_trait]
pub trait UdnClient: Send + Sync + fmt::Debug {
    /// Returns the address `name` holds for `coin_code`.
    ///
    /// With `chain` set, only the address of that chain of a multi-chain
    /// token is considered.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NotFound`] if the domain has no such record,
    /// and another variant if the registry could not be queried.
    async fn resolve(
        &self,
        name: &str,
        coin_code: &str,
        chain: Option<&str>,
    ) -> Result<String, ResolutionError>;
}

/// Errors from constructing an [`HttpUdnClient`].
#[derive(Debug, thiserror::Error)]
pub enum UdnClientError {
    /// The base URL cannot be extended with the domains path.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// What was being built.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct DomainResponse {
    #[serde(default)]
    records: HashMap<String, String>,
}

/// [`UdnClient`] backed by the registry's REST API.
#[derive(Clone)]
pub struct HttpUdnClient {
    client: Client,
    base_url: Url,
    domains_url: Url,
    api_key: Option<String>,
}

impl fmt::Debug for HttpUdnClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpUdnClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpUdnClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client for the registry at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`UdnClientError`] if the domains URL cannot be derived from
    /// `base_url` or the HTTP client cannot be built.
    pub fn try_new(base_url: Url) -> Result<Self, UdnClientError> {
        let domains_url = base_url
            .join(DOMAINS_PATH)
            .map_err(|source| UdnClientError::UrlParse {
                context: "Failed to construct ./resolve/domains/ URL",
                source,
            })?;
        let client = Client::builder().timeout(Self::DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            domains_url,
            api_key: None,
        })
    }

    /// Creates a client for the public registry API.
    ///
    /// # Errors
    ///
    /// Returns [`UdnClientError`] if the HTTP client cannot be built.
    pub fn try_default() -> Result<Self, UdnClientError> {
        let base_url = Url::parse(DEFAULT_UDN_URL).map_err(|source| UdnClientError::UrlParse {
            context: "Invalid default registry URL",
            source,
        })?;
        Self::try_new(base_url)
    }

    /// Sets the API key sent as a bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replaces the HTTP client, e.g. to change the request timeout.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the registry base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn domain_url(&self, name: &str) -> Result<Url, ResolutionError> {
        let mut url = self.domains_url.clone();
        url.path_segments_mut()
            .map_err(|()| ResolutionError::InvalidName(name.to_owned()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    /// Fetches every record of `name`.
    async fn records(&self, name: &str) -> Result<HashMap<String, String>, ResolutionError> {
        let mut request = self.client.get(self.domain_url(name)?);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().await.map_err(ResolutionError::transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ResolutionError::not_found(name, "domain"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolutionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let domain: DomainResponse = response
            .json()
            .await
            .map_err(|e| ResolutionError::Malformed(format!("domain response: {e}")))?;
        Ok(domain.records)
    }
}

#[async_trait]
impl UdnClient for HttpUdnClient {
    async fn resolve(
        &self,
        name: &str,
        coin_code: &str,
        chain: Option<&str>,
    ) -> Result<String, ResolutionError> {
        let key = record_key(coin_code, chain);
        let mut records = self.records(name).await?;
        match records.remove(&key) {
            Some(address) if !address.trim().is_empty() => Ok(address),
            _ => Err(ResolutionError::not_found(name, key)),
        }
    }
}
