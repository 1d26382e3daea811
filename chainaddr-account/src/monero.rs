//! Monero standard, integrated and subaddresses.

use chainaddr::Blockchain;

use crate::delegate::{AccountCodec, DelegateHandler};
use crate::error::AccountAddressError;

/// Mainnet Monero addresses, as parsed by the `monero` crate.
#[derive(Debug, Clone, Copy)]
pub struct MoneroFormat;

impl AccountCodec for MoneroFormat {
    const BLOCKCHAIN: Blockchain = Blockchain::Monero;

    fn canonicalize(text: &str) -> Result<String, AccountAddressError> {
        let address: ::monero::Address = text
            .parse()
            .map_err(|e| AccountAddressError::rejected(Self::BLOCKCHAIN, e))?;
        if address.network != ::monero::Network::Mainnet {
            return Err(AccountAddressError::Network);
        }
        Ok(text.to_owned())
    }
}

/// Native handler for Monero addresses.
pub type MoneroHandler = DelegateHandler<MoneroFormat>;

#[cfg(test)]
mod tests {
    use super::*;
    use chainaddr::AddressHandler;

    const GENERAL_FUND: &str = "44AFFq5kSiGBoZ4NMDwYtN18obc8AemS33DBLWs3H7otXft3XjrpDtQGv7SqSsaBYBb98uNbr2VBBEt7f2wfn3RVGQBEP3A";

    #[tokio::test]
    async fn test_accepts_standard_address() {
        let address = MoneroHandler::new().try_resolve(GENERAL_FUND).await.unwrap();
        assert_eq!(address.resolved_value(), GENERAL_FUND);
        assert_eq!(address.blockchain(), Blockchain::Monero);
    }

    #[tokio::test]
    async fn test_produce_is_idempotent() {
        let handler = MoneroHandler::new();
        let first = handler.try_resolve(GENERAL_FUND).await.unwrap();
        let second = handler.try_resolve(first.resolved_value()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rejects_invalid() {
        let handler = MoneroHandler::new();
        let mut mutated = GENERAL_FUND.to_owned();
        mutated.replace_range(10..11, "j");
        assert!(!handler.can_accept(&mutated).await);
        assert!(!handler.can_accept("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await);
        assert!(!handler.can_accept("").await);
    }
}
