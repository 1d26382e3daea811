//! Zcash addresses: transparent, Sapling, unified and TEX.

use chainaddr::Blockchain;
use zcash_address::{ConversionError, TryFromRawAddress, ZcashAddress, unified};
use zcash_protocol::consensus::NetworkType;

use crate::delegate::{AccountCodec, DelegateHandler};
use crate::error::AccountAddressError;

/// Marker produced for every receivable mainnet address kind. Sprout is left
/// unsupported.
struct Receivable;

impl TryFromRawAddress for Receivable {
    type Error = &'static str;

    fn try_from_raw_sapling(
        _data: [u8; 43],
    ) -> Result<Self, ConversionError<Self::Error>> {
        Ok(Self)
    }

    fn try_from_raw_unified(
        _data: unified::Address,
    ) -> Result<Self, ConversionError<Self::Error>> {
        Ok(Self)
    }

    fn try_from_raw_transparent_p2pkh(
        _data: [u8; 20],
    ) -> Result<Self, ConversionError<Self::Error>> {
        Ok(Self)
    }

    fn try_from_raw_transparent_p2sh(
        _data: [u8; 20],
    ) -> Result<Self, ConversionError<Self::Error>> {
        Ok(Self)
    }

    fn try_from_raw_tex(
        _data: [u8; 20],
    ) -> Result<Self, ConversionError<Self::Error>> {
        Ok(Self)
    }
}

/// Mainnet Zcash addresses, as parsed by the `zcash_address` crate.
#[derive(Debug, Clone, Copy)]
pub struct ZcashFormat;

impl AccountCodec for ZcashFormat {
    const BLOCKCHAIN: Blockchain = Blockchain::Zcash;

    fn canonicalize(text: &str) -> Result<String, AccountAddressError> {
        let address = text
            .parse::<ZcashAddress>()
            .map_err(|e| AccountAddressError::rejected(Self::BLOCKCHAIN, e))?;
        match address.convert_if_network::<Receivable>(NetworkType::Main) {
            Ok(Receivable) => Ok(text.to_owned()),
            Err(ConversionError::IncorrectNetwork { .. }) => Err(AccountAddressError::Network),
            Err(e) => Err(AccountAddressError::rejected(Self::BLOCKCHAIN, e)),
        }
    }
}

/// Native handler for Zcash addresses.
pub type ZcashHandler = DelegateHandler<ZcashFormat>;

#[cfg(test)]
mod tests {
    use super::*;
    use chainaddr::AddressHandler;

    #[tokio::test]
    async fn test_accepts_transparent() {
        let handler = ZcashHandler::new();
        for text in [
            "t1UgBtmkZGD6yPKoXTfTvjED1qjER7tx32F",
            "t3VNCpKEzp7RMUVVxam8X9rZwzFX8bSZrLc",
        ] {
            let address = handler.try_resolve(text).await.unwrap();
            assert_eq!(address.resolved_value(), text);
            assert_eq!(address.blockchain(), Blockchain::Zcash);
        }
    }

    #[tokio::test]
    async fn test_accepts_sapling() {
        let text = "zs1z7rejlpsa98s2rrrfkwmaxu53e4ue0ulcrw0h4x5g8jl04tak0d3mm47vdtahatqrlkngh9slya";
        let address = ZcashHandler::new().try_resolve(text).await.unwrap();
        assert_eq!(address.resolved_value(), text);
    }

    #[tokio::test]
    async fn test_produce_is_idempotent() {
        let handler = ZcashHandler::new();
        let first = handler.try_resolve("t3VNCpKEzp7RMUVVxam8X9rZwzFX8bSZrLc").await.unwrap();
        let second = handler.try_resolve(first.resolved_value()).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_testnet_and_invalid() {
        assert!(matches!(
            ZcashFormat::canonicalize("tmLWwDcExescUXZzy8PmfatsmSiKEcvEZA4"),
            Err(AccountAddressError::Network)
        ));
        assert!(matches!(
            ZcashFormat::canonicalize("t1UgBtmkZGD6yPKoXTfTvjED1qjER7tx32G"),
            Err(AccountAddressError::Rejected { .. })
        ));
        assert!(ZcashFormat::canonicalize("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").is_err());
    }
}
