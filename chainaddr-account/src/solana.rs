//! Solana base58 public keys.

use chainaddr::Blockchain;
use solana_pubkey::Pubkey;

use crate::delegate::{AccountCodec, DelegateHandler};
use crate::error::AccountAddressError;

/// A 32-byte ed25519 public key in base58, as parsed by the Solana SDK.
#[derive(Debug, Clone, Copy)]
pub struct SolanaFormat;

impl AccountCodec for SolanaFormat {
    const BLOCKCHAIN: Blockchain = Blockchain::Solana;

    fn canonicalize(text: &str) -> Result<String, AccountAddressError> {
        text.parse::<Pubkey>()
            .map_err(|e| AccountAddressError::rejected(Self::BLOCKCHAIN, e))?;
        Ok(text.to_owned())
    }
}

/// Native handler for Solana addresses.
pub type SolanaHandler = DelegateHandler<SolanaFormat>;

#[cfg(test)]
mod tests {
    use super::*;
    use chainaddr::AddressHandler;

    #[tokio::test]
    async fn test_accepts_public_keys() {
        let handler = SolanaHandler::new();
        for text in [
            "11111111111111111111111111111111",
            "So11111111111111111111111111111111111111112",
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
        ] {
            let address = handler.try_resolve(text).await.unwrap();
            assert_eq!(address.resolved_value(), text);
            assert_eq!(address.blockchain(), Blockchain::Solana);
        }
    }

    #[tokio::test]
    async fn test_produce_is_idempotent() {
        let handler = SolanaHandler::new();
        let first = handler
            .try_resolve("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA")
            .await
            .unwrap();
        let second = handler.try_resolve(first.resolved_value()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rejects_other_base58_payloads() {
        let handler = SolanaHandler::new();
        assert!(!handler.can_accept("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await);
        assert!(!handler.can_accept("TLmntVi9ScSKwrpG7WJX7ZoEVrneWgoHFH").await);
        assert!(!handler.can_accept("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5D0").await);
        assert!(!handler.can_accept("").await);
    }
}
