//! Blockchain identifiers.
//!
//! - [`Blockchain`] - A supported blockchain (e.g., `bitcoin`, `ethereum`, `tron`)
//! - [`AddressFamily`] - The address encoding family a blockchain belongs to
//!
//! Blockchains are identified by a stable kebab-case uid which is what
//! [`FromStr`], [`Display`](fmt::Display) and serde use.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use crate::networks::{self, BlockchainInfo};

/// A blockchain supported by the resolver.
///
/// Every handler is bound to exactly one `Blockchain` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Blockchain {
    /// Bitcoin mainnet.
    Bitcoin,
    /// Bitcoin Cash.
    BitcoinCash,
    /// eCash (XEC).
    ECash,
    /// Litecoin.
    Litecoin,
    /// Dash.
    Dash,
    /// Dogecoin.
    Dogecoin,
    /// Ethereum mainnet.
    Ethereum,
    /// BNB Smart Chain.
    BinanceSmartChain,
    /// Polygon `PoS`.
    Polygon,
    /// Avalanche C-Chain.
    Avalanche,
    /// Optimism.
    Optimism,
    /// Arbitrum One.
    ArbitrumOne,
    /// Base.
    Base,
    /// Gnosis Chain.
    Gnosis,
    /// Fantom Opera.
    Fantom,
    /// zkSync Era.
    ZkSync,
    /// Solana mainnet.
    Solana,
    /// Tron.
    Tron,
    /// The Open Network.
    Ton,
    /// Stellar.
    Stellar,
    /// Monero.
    Monero,
    /// Zcash.
    Zcash,
}

impl Blockchain {
    /// Every supported blockchain, in a stable order.
    pub const ALL: &'static [Self] = &[
        Self::Bitcoin,
        Self::BitcoinCash,
        Self::ECash,
        Self::Litecoin,
        Self::Dash,
        Self::Dogecoin,
        Self::Ethereum,
        Self::BinanceSmartChain,
        Self::Polygon,
        Self::Avalanche,
        Self::Optimism,
        Self::ArbitrumOne,
        Self::Base,
        Self::Gnosis,
        Self::Fantom,
        Self::ZkSync,
        Self::Solana,
        Self::Tron,
        Self::Ton,
        Self::Stellar,
        Self::Monero,
        Self::Zcash,
    ];

    /// Returns the static metadata for this blockchain.
    #[must_use]
    pub fn info(self) -> &'static BlockchainInfo {
        &networks::BLOCKCHAINS[self as usize]
    }

    /// Returns the stable kebab-case uid (e.g., `"bitcoin-cash"`).
    #[must_use]
    pub fn uid(self) -> &'static str {
        self.info().uid
    }

    /// Returns the human-readable name (e.g., `"Bitcoin Cash"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Returns the address encoding family.
    #[must_use]
    pub fn family(self) -> AddressFamily {
        self.info().family
    }

    /// Returns `true` for EVM-compatible chains.
    #[must_use]
    pub fn is_evm(self) -> bool {
        self.family() == AddressFamily::Evm
    }

    /// Returns the coin code of the chain's native asset, used as the final
    /// fallback when resolving names through a universal registry.
    #[must_use]
    pub fn coin_code(self) -> &'static str {
        self.info().coin_code
    }

    /// Returns the multi-chain version hint a universal registry uses for
    /// tokens deployed on this chain (e.g., `"ERC20"`, `"BEP20"`, `"TRON"`).
    #[must_use]
    pub fn multichain_hint(self) -> Option<&'static str> {
        self.info().multichain_hint
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uid())
    }
}

/// Error returned when parsing an unknown blockchain uid.
#[derive(Debug, thiserror::Error)]
#[error("Unknown blockchain {0}")]
pub struct UnknownBlockchainError(String);

impl FromStr for Blockchain {
    type Err = UnknownBlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        networks::BLOCKCHAINS
            .iter()
            .find(|info| info.uid.eq_ignore_ascii_case(needle))
            .map(|info| info.blockchain)
            .ok_or_else(|| UnknownBlockchainError(s.into()))
    }
}

impl Serialize for Blockchain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.uid())
    }
}

impl<'de> Deserialize<'de> for Blockchain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

/// The address encoding family of a blockchain.
///
/// The family decides which native handlers a chain gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// Bitcoin-derived chains (Base58Check, Bech32, CashAddr).
    Utxo,
    /// EVM chains (20-byte hex with EIP-55 checksum).
    Evm,
    /// Solana (base58 ed25519 public key).
    Solana,
    /// Tron (Base58Check with `0x41` prefix).
    Tron,
    /// TON (user-friendly base64 or raw `workchain:hash`).
    Ton,
    /// Stellar (strkey).
    Stellar,
    /// Monero (Monero base58 with Keccak checksum).
    Monero,
    /// Zcash (transparent, Sapling, unified).
    Zcash,
}
