//! Ethereum Name Service support.
//!
//! - [`namehash`] - EIP-137 name hashing
//! - [`EnsClient`] - The name service seam, one method
//! - [`RpcEnsClient`] - Default client resolving through JSON-RPC `eth_call`
//! - [`EnsHandler`] - Cached domain handler built on any [`EnsClient`]

mod handler;
mod rpc;

pub use handler::EnsHandler;
pub use rpc::{RpcEnsClient, RpcEnsConfig};

use alloy_primitives::{B256, keccak256};
use async_trait::async_trait;
use chainaddr::ResolutionError;
use std::fmt;

/// Maximum length of a DNS-compatible name.
const MAX_NAME_LEN: usize = 255;

/// Resolves an ENS name to the address text it points to.
#[async_trait]
pub trait EnsClient: Send + Sync + fmt::Debug {
    /// Returns the address `name` resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NotFound`] if the name has no resolver or
    /// no address, and another variant if the service could not be queried.
    async fn resolve(&self, name: &str) -> Result<String, ResolutionError>;
}

/// Computes the EIP-137 namehash of `name`.
///
/// Labels are lowercased before hashing. Full UTS-46 normalization is left to
/// callers.
#[must_use]
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }
    name.rsplit('.').fold(B256::ZERO, |node, label| {
        let label_hash = keccak256(label.to_lowercase().as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        keccak256(buf)
    })
}

/// Offline check that `text` is shaped like a resolvable name.
///
/// Requires at least two non-empty dot-separated labels and rejects
/// whitespace, `:` and `/`, which never occur in names but do in URIs and
/// account addresses.
#[must_use]
pub fn is_name_shaped(text: &str) -> bool {
    !text.is_empty()
        && text.len() <= MAX_NAME_LEN
        && !text
            .chars()
            .any(|c| c.is_whitespace() || c == ':' || c == '/')
        && text.split('.').count() >= 2
        && text.split('.').all(|label| !label.is_empty())
}
