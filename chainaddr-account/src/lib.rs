#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Account-model chain support for the chainaddr resolver.
//!
//! Each chain's address rules live in an [`AccountCodec`], mostly delegating
//! to that chain's SDK, and are exposed as a native [`DelegateHandler`]:
//!
//! | Chain | Handler | Validation | Output |
//! |-------|---------|------------|--------|
//! | Solana | [`SolanaHandler`] | `solana-pubkey` | unchanged |
//! | Tron | [`TronHandler`] | Base58Check, version `0x41`, or `41`-hex | base58 |
//! | TON | [`TonHandler`] | raw or user-friendly, CRC-16/XMODEM | unchanged |
//! | Stellar | [`StellarHandler`] | `stellar-strkey` | unchanged |
//! | Monero | [`MoneroHandler`] | `monero`, mainnet only | unchanged |
//! | Zcash | [`ZcashHandler`] | `zcash_address`, mainnet only | unchanged |

pub mod delegate;
pub mod error;
pub mod monero;
pub mod solana;
pub mod stellar;
pub mod ton;
pub mod tron;
pub mod zcash;

pub use delegate::{AccountCodec, DelegateHandler};
pub use crate::monero::MoneroHandler;
pub use error::AccountAddressError;
pub use solana::SolanaHandler;
pub use stellar::StellarHandler;
pub use ton::TonHandler;
pub use tron::TronHandler;
pub use zcash::ZcashHandler;

use chainaddr::{AddressFamily, AddressHandler, Blockchain};

/// Builds the native handler for an account-model blockchain.
///
/// Returns an empty list for UTXO and EVM chains.
#[must_use]
pub fn native_handlers(blockchain: Blockchain) -> Vec<Box<dyn AddressHandler>> {
    let handler: Box<dyn AddressHandler> = match blockchain.family() {
        AddressFamily::Solana => Box::new(SolanaHandler::new()),
        AddressFamily::Tron => Box::new(TronHandler::new()),
        AddressFamily::Ton => Box::new(TonHandler::new()),
        AddressFamily::Stellar => Box::new(StellarHandler::new()),
        AddressFamily::Monero => Box::new(MoneroHandler::new()),
        AddressFamily::Zcash => Box::new(ZcashHandler::new()),
        AddressFamily::Utxo | AddressFamily::Evm => return Vec::new(),
    };
    vec![handler]
}
