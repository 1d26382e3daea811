#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! UTXO chain support for the chainaddr resolver.
//!
//! Bitcoin-derived chains share three address encodings, each parameterized
//! by per-network constants from [`UtxoParams`]:
//!
//! | Encoding | Handler | Networks |
//! |----------|---------|----------|
//! | Base58Check | [`Base58Handler`] | every UTXO chain |
//! | Bech32 / Bech32m (segwit) | [`SegwitHandler`] | Bitcoin, Litecoin |
//! | CashAddr | [`CashAddrHandler`] | Bitcoin Cash, eCash |
//!
//! All handlers are native: they decode offline and produce addresses tagged
//! with the decoded [`ScriptType`](chainaddr::ScriptType).
//!
//! # Example
//!
//! ```ignore
//! use chainaddr::{AddressHandler, Blockchain};
//! use chainaddr_utxo::{Base58Handler, UtxoParams};
//!
//! let params = UtxoParams::for_blockchain(Blockchain::Bitcoin).unwrap();
//! let handler = Base58Handler::new(params);
//! let address = handler.try_resolve("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await;
//! ```

pub mod base58;
pub mod cashaddr;
pub mod segwit;

mod networks;
pub use networks::*;

pub use base58::Base58Handler;
pub use cashaddr::CashAddrHandler;
pub use segwit::SegwitHandler;

use chainaddr::{AddressHandler, Blockchain};

/// Builds the native handlers for a UTXO blockchain in match order.
///
/// Legacy Base58Check comes first, followed by the network's segwit or
/// CashAddr handler when it has one. Returns an empty list for chains
/// without UTXO parameters.
#[must_use]
pub fn native_handlers(blockchain: Blockchain) -> Vec<Box<dyn AddressHandler>> {
    let Some(params) = UtxoParams::for_blockchain(blockchain) else {
        return Vec::new();
    };
    let mut handlers: Vec<Box<dyn AddressHandler>> = vec![Box::new(Base58Handler::new(params))];
    if params.segwit_hrp.is_some() {
        handlers.push(Box::new(SegwitHandler::new(params)));
    }
    if params.cashaddr_prefix.is_some() {
        handlers.push(Box::new(CashAddrHandler::new(params)));
    }
    handlers
}
