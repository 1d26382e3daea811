//! Resolver configuration.
//!
//! Loads configuration from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! timeout_secs = 10
//!
//! [ens]
//! rpc_url = "https://eth-mainnet.g.alchemy.com/v2/${ALCHEMY_KEY}"
//!
//! [udn]
//! api_key = "$UDN_API_KEY"
//!
//! [coins]
//! polygon = "USDT"
//! tron = "USDT"
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to configuration file (default: `chainaddr.toml`)
//! - `ENS_RPC_URL` - Override the ENS JSON-RPC endpoint
//! - `UDN_API_KEY` - Override the universal registry API key

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use chainaddr::{Blockchain, DEFAULT_RESOLUTION_TIMEOUT};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "chainaddr.toml";

/// Errors raised while loading configuration or building clients from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid TOML for [`ResolverConfig`].
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    /// A configured URL is invalid.
    #[error("Invalid URL for {context}: {source}")]
    Url {
        /// Which setting holds the URL.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The configured ENS registry is not an EVM address.
    #[error("Invalid ENS registry address {0}")]
    Registry(String),
    /// The universal registry client could not be built.
    #[error(transparent)]
    Udn(#[from] chainaddr_http::UdnClientError),
}

/// Top-level resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Bound on each name-service request, in seconds (default: `10`).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// ENS settings. ENS handlers are built only when present.
    #[serde(default)]
    pub ens: Option<EnsConfig>,

    /// Universal registry settings. Registry handlers are built only when present.
    #[serde(default)]
    pub udn: Option<UdnConfig>,

    /// Token coin code looked up per blockchain by the registry handlers.
    #[serde(default)]
    pub coins: BTreeMap<Blockchain, String>,
}

/// ENS name service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsConfig {
    /// Ethereum JSON-RPC endpoint.
    pub rpc_url: String,

    /// ENS registry contract, if not the mainnet default.
    #[serde(default)]
    pub registry: Option<String>,
}

/// Universal registry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UdnConfig {
    /// Registry API base URL.
    #[serde(default = "default_udn_url")]
    pub base_url: String,

    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for UdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_udn_url(),
            api_key: None,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            ens: None,
            udn: None,
            coins: BTreeMap::new(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_RESOLUTION_TIMEOUT.as_secs()
}

fn default_udn_url() -> String {
    chainaddr_http::constants::DEFAULT_UDN_URL.to_owned()
}

impl ResolverConfig {
    /// Loads configuration from the path given by the `CONFIG` environment
    /// variable, falling back to `chainaddr.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        Self::load_from(path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file yields the defaults. String values are expanded from
    /// the process environment, then `ENS_RPC_URL` and `UDN_API_KEY`
    /// override the file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = if path.exists() {
            std::fs::read_to_string(path)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            String::new()
        };
        Self::parse_with(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML `content`, resolving variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the expanded content is not a valid
    /// configuration.
    pub fn parse_with<F>(content: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = expand_env_vars(content, &lookup);
        let mut config: Self = toml::from_str(&expanded)?;
        config.apply_overrides(&lookup);
        config.drop_unresolved();
        Ok(config)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rpc_url) = lookup("ENS_RPC_URL").filter(|v| !v.is_empty()) {
            match &mut self.ens {
                Some(ens) => ens.rpc_url = rpc_url,
                None => {
                    self.ens = Some(EnsConfig {
                        rpc_url,
                        registry: None,
                    });
                }
            }
        }
        if let Some(api_key) = lookup("UDN_API_KEY").filter(|v| !v.is_empty()) {
            self.udn.get_or_insert_with(UdnConfig::default).api_key = Some(api_key);
        }
    }

    /// Disables services whose settings still reference unset variables.
    fn drop_unresolved(&mut self) {
        if self.ens.as_ref().is_some_and(|ens| is_unresolved(&ens.rpc_url)) {
            tracing::warn!("Disabling ENS: rpc_url not resolved (missing env var?)");
            self.ens = None;
        }
        if let Some(udn) = &mut self.udn
            && udn.api_key.as_deref().is_some_and(is_unresolved)
        {
            tracing::warn!("Universal registry api_key not resolved, sending requests without it");
            udn.api_key = None;
        }
    }
}

fn is_unresolved(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.contains('$')
}

/// Expands `$VAR` and `${VAR}` patterns in a string through `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_env_vars<F>(input: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        while let Some(&c) = chars.peek() {
            if braced {
                if c == '}' {
                    chars.next();
                    break;
                }
            } else if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        match lookup(&var_name) {
            Some(value) if !var_name.is_empty() => result.push_str(&value),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if braced && !var_name.is_empty() {
                    result.push('}');
                }
            }
        }
    }

    result
}
