//! The canonical result of a successful resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::blockchain::Blockchain;

/// The spending-condition class encoded in a UTXO address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    /// Pay to public key hash.
    P2pkh,
    /// Pay to script hash.
    P2sh,
    /// Pay to witness public key hash (segwit v0, 20-byte program).
    P2wpkh,
    /// Pay to witness script hash (segwit v0, 32-byte program).
    P2wsh,
    /// Pay to taproot (segwit v1, 32-byte program).
    P2tr,
    /// Pay to public key.
    P2pk,
    /// A witness program with a version or length that has no named script class.
    WitnessUnknown,
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::P2pkh => "p2pkh",
            Self::P2sh => "p2sh",
            Self::P2wpkh => "p2wpkh",
            Self::P2wsh => "p2wsh",
            Self::P2tr => "p2tr",
            Self::P2pk => "p2pk",
            Self::WitnessUnknown => "witness_unknown",
        };
        f.write_str(name)
    }
}

/// A validated, chain-specific address.
///
/// `resolved_value` is always the chain-native text in the canonical form
/// produced by that chain's codec, never the domain name it was resolved
/// from. Addresses produced by UTXO native handlers also carry the decoded
/// [`ScriptType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    resolved_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_domain: Option<String>,
    blockchain: Blockchain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    script_type: Option<ScriptType>,
}

impl Address {
    /// Creates an address for an account-model or EVM chain.
    pub fn new(resolved_value: impl Into<String>, blockchain: Blockchain) -> Self {
        Self {
            resolved_value: resolved_value.into(),
            source_domain: None,
            blockchain,
            script_type: None,
        }
    }

    /// Creates a UTXO address carrying its decoded script type.
    pub fn utxo(
        resolved_value: impl Into<String>,
        blockchain: Blockchain,
        script_type: ScriptType,
    ) -> Self {
        Self {
            resolved_value: resolved_value.into(),
            source_domain: None,
            blockchain,
            script_type: Some(script_type),
        }
    }

    /// Creates a raw, unvalidated address from literal text.
    ///
    /// This is the fallback callers use when no handler accepted the text.
    pub fn unvalidated(text: impl Into<String>, blockchain: Blockchain) -> Self {
        Self::new(text, blockchain)
    }

    /// Records the human-readable name this address was resolved from.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.source_domain = Some(domain.into());
        self
    }

    /// Returns the chain-native address text.
    #[must_use]
    pub fn resolved_value(&self) -> &str {
        &self.resolved_value
    }

    /// Returns the domain name this address was resolved from, if any.
    #[must_use]
    pub fn source_domain(&self) -> Option<&str> {
        self.source_domain.as_deref()
    }

    /// Returns the blockchain this address belongs to.
    #[must_use]
    pub const fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    /// Returns the decoded script type for UTXO addresses.
    #[must_use]
    pub const fn script_type(&self) -> Option<ScriptType> {
        self.script_type
    }

    /// Consumes the address and returns the chain-native text.
    #[must_use]
    pub fn into_resolved_value(self) -> String {
        self.resolved_value
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved_value)
    }
}
