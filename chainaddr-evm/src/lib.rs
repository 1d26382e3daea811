#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM chain support for the chainaddr resolver.
//!
//! Every EVM chain shares one address format, so a single [`EvmHandler`] type
//! serves all of them, each instance bound to one chain. Names are resolved
//! through the Ethereum Name Service by [`EnsHandler`].
//!
//! # Modules
//!
//! - [`address`] - EIP-55 address parsing and the native [`EvmHandler`]
//! - [`ens`] - Namehash, the [`EnsClient`] seam, JSON-RPC client and domain handler
//!
//! # Feature Flags
//!
//! - `telemetry` - Logs ENS resolutions and failures through `tracing`

pub mod address;
pub mod ens;

mod networks;
pub use networks::*;

pub use address::{EvmAddressError, EvmHandler};
pub use ens::{EnsClient, EnsHandler, RpcEnsClient, RpcEnsConfig};

use chainaddr::{AddressHandler, Blockchain};

/// Builds the native handlers for an EVM blockchain.
///
/// Returns an empty list for chains outside the EVM family.
#[must_use]
pub fn native_handlers(blockchain: Blockchain) -> Vec<Box<dyn AddressHandler>> {
    if blockchain.is_evm() {
        vec![Box::new(EvmHandler::new(blockchain))]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_sets() {
        for blockchain in Blockchain::ALL {
            let handlers = native_handlers(*blockchain);
            assert_eq!(handlers.len(), usize::from(blockchain.is_evm()), "{blockchain}");
            if let Some(handler) = handlers.first() {
                assert_eq!(handler.blockchain(), *blockchain);
            }
        }
    }
}
