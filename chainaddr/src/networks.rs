//! Static blockchain metadata.
//!
//! One [`BlockchainInfo`] row per [`Blockchain`], in enum order. The coin
//! codes and multi-chain hints are the keys a universal domain registry uses
//! to store per-chain records (`crypto.{COIN}.address` and
//! `crypto.{COIN}.version.{HINT}.address`).

use crate::blockchain::{AddressFamily, Blockchain};

/// Static metadata for a supported blockchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockchainInfo {
    /// The blockchain this row describes.
    pub blockchain: Blockchain,
    /// Stable kebab-case identifier (e.g., `"bitcoin-cash"`).
    pub uid: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Address encoding family.
    pub family: AddressFamily,
    /// Coin code of the native asset (e.g., `"BTC"`).
    pub coin_code: &'static str,
    /// Multi-chain version hint for tokens on this chain, if the registry has one.
    pub multichain_hint: Option<&'static str>,
}

const fn info(
    blockchain: Blockchain,
    uid: &'static str,
    name: &'static str,
    family: AddressFamily,
    coin_code: &'static str,
    multichain_hint: Option<&'static str>,
) -> BlockchainInfo {
    BlockchainInfo {
        blockchain,
        uid,
        name,
        family,
        coin_code,
        multichain_hint,
    }
}

/// Metadata for every supported blockchain, indexed by `Blockchain as usize`.
pub static BLOCKCHAINS: &[BlockchainInfo] = &[
    info(Blockchain::Bitcoin, "bitcoin", "Bitcoin", AddressFamily::Utxo, "BTC", None),
    info(
        Blockchain::BitcoinCash,
        "bitcoin-cash",
        "Bitcoin Cash",
        AddressFamily::Utxo,
        "BCH",
        None,
    ),
    info(Blockchain::ECash, "ecash", "eCash", AddressFamily::Utxo, "XEC", None),
    info(Blockchain::Litecoin, "litecoin", "Litecoin", AddressFamily::Utxo, "LTC", None),
    info(Blockchain::Dash, "dash", "Dash", AddressFamily::Utxo, "DASH", None),
    info(Blockchain::Dogecoin, "dogecoin", "Dogecoin", AddressFamily::Utxo, "DOGE", None),
    info(
        Blockchain::Ethereum,
        "ethereum",
        "Ethereum",
        AddressFamily::Evm,
        "ETH",
        Some("ERC20"),
    ),
    info(
        Blockchain::BinanceSmartChain,
        "binance-smart-chain",
        "BNB Smart Chain",
        AddressFamily::Evm,
        "BNB",
        Some("BEP20"),
    ),
    info(
        Blockchain::Polygon,
        "polygon",
        "Polygon",
        AddressFamily::Evm,
        "MATIC",
        Some("MATIC"),
    ),
    info(
        Blockchain::Avalanche,
        "avalanche",
        "Avalanche",
        AddressFamily::Evm,
        "AVAX",
        Some("AVAX"),
    ),
    info(
        Blockchain::Optimism,
        "optimism",
        "Optimism",
        AddressFamily::Evm,
        "ETH",
        Some("OP"),
    ),
    info(
        Blockchain::ArbitrumOne,
        "arbitrum-one",
        "Arbitrum One",
        AddressFamily::Evm,
        "ETH",
        Some("ARB"),
    ),
    info(Blockchain::Base, "base", "Base", AddressFamily::Evm, "ETH", Some("BASE")),
    info(
        Blockchain::Gnosis,
        "gnosis",
        "Gnosis",
        AddressFamily::Evm,
        "XDAI",
        Some("XDAI"),
    ),
    info(
        Blockchain::Fantom,
        "fantom",
        "Fantom",
        AddressFamily::Evm,
        "FTM",
        Some("FANTOM"),
    ),
    info(Blockchain::ZkSync, "zksync", "zkSync", AddressFamily::Evm, "ETH", None),
    info(
        Blockchain::Solana,
        "solana",
        "Solana",
        AddressFamily::Solana,
        "SOL",
        Some("SOL"),
    ),
    info(Blockchain::Tron, "tron", "Tron", AddressFamily::Tron, "TRX", Some("TRON")),
    info(Blockchain::Ton, "the-open-network", "TON", AddressFamily::Ton, "TON", None),
    info(Blockchain::Stellar, "stellar", "Stellar", AddressFamily::Stellar, "XLM", None),
    info(Blockchain::Monero, "monero", "Monero", AddressFamily::Monero, "XMR", None),
    info(Blockchain::Zcash, "zcash", "Zcash", AddressFamily::Zcash, "ZEC", None),
];

/// Returns every blockchain of the given address family.
#[must_use]
pub fn blockchains_by_family(family: AddressFamily) -> Vec<Blockchain> {
    BLOCKCHAINS
        .iter()
        .filter(|info| info.family == family)
        .map(|info| info.blockchain)
        .collect()
}
