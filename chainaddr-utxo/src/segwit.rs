//! Native segwit addresses (BIP-173 bech32 and BIP-350 bech32m).

use async_trait::async_trait;
use bech32::Fe32;
use chainaddr::{Address, AddressHandler, Blockchain, HandlerKind, ScriptType};

use crate::networks::UtxoParams;

/// Errors from decoding a segwit address.
#[derive(Debug, thiserror::Error)]
pub enum SegwitError {
    /// Checksum, case, witness version or program length is invalid.
    #[error("Invalid segwit address: {0}")]
    Decode(#[from] bech32::segwit::DecodeError),
    /// The human-readable part belongs to another network.
    #[error("Unexpected human-readable part {actual:?}, expected {expected:?}")]
    Hrp {
        /// The HRP of the decoded address.
        actual: String,
        /// The HRP of the handler's network.
        expected: &'static str,
    },
    /// The network has no segwit support.
    #[error("Network has no segwit addresses")]
    Unsupported,
}

/// Decodes a segwit address and classifies its witness program.
///
/// The checksum variant is tied to the witness version: version 0 requires
/// bech32, later versions require bech32m.
///
/// # Errors
///
/// Returns [`SegwitError`] if the text is not a valid segwit address of the network.
pub fn decode(text: &str, params: &UtxoParams) -> Result<ScriptType, SegwitError> {
    let expected = params.segwit_hrp.ok_or(SegwitError::Unsupported)?;
    let (hrp, version, program) = bech32::segwit::decode(text)?;
    if !hrp.as_str().eq_ignore_ascii_case(expected) {
        return Err(SegwitError::Hrp {
            actual: hrp.as_str().to_owned(),
            expected,
        });
    }
    Ok(script_type(version, program.len()))
}

fn script_type(version: Fe32, program_len: usize) -> ScriptType {
    match (version.to_u8(), program_len) {
        (0, 20) => ScriptType::P2wpkh,
        (0, 32) => ScriptType::P2wsh,
        (1, 32) => ScriptType::P2tr,
        _ => ScriptType::WitnessUnknown,
    }
}

/// Native handler for segwit addresses of one UTXO network.
///
/// Accepts all-lowercase and all-uppercase input and produces the lowercase
/// form.
#[derive(Debug, Clone, Copy)]
pub struct SegwitHandler {
    params: &'static UtxoParams,
}

impl SegwitHandler {
    /// Creates a handler for the network described by `params`.
    #[must_use]
    pub const fn new(params: &'static UtxoParams) -> Self {
        Self { params }
    }
}

#[async_trait]
impl AddressHandler for SegwitHandler {
    fn blockchain(&self) -> Blockchain {
        self.params.blockchain
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Native
    }

    async fn can_accept(&self, text: &str) -> bool {
        let result = decode(text, self.params);
        #[cfg(feature = "telemetry")]
        if let Err(err) = &result {
            tracing::trace!(blockchain = %self.params.blockchain, error = %err, "Segwit decode failed");
        }
        result.is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        let script_type =
            decode(text, self.params).expect("produce called for text rejected by can_accept");
        Address::utxo(text.to_ascii_lowercase(), self.params.blockchain, script_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(blockchain: Blockchain) -> SegwitHandler {
        SegwitHandler::new(UtxoParams::for_blockchain(blockchain).unwrap())
    }

    #[tokio::test]
    async fn test_bitcoin_script_types() {
        let bitcoin = handler(Blockchain::Bitcoin);
        let cases = [
            ("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", ScriptType::P2wpkh),
            (
                "bc1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3qccfmv3",
                ScriptType::P2wsh,
            ),
            (
                "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297",
                ScriptType::P2tr,
            ),
        ];
        for (text, expected) in cases {
            let address = bitcoin.try_resolve(text).await.unwrap();
            assert_eq!(address.script_type(), Some(expected), "{text}");
            assert_eq!(address.resolved_value(), text);
        }
    }

    #[tokio::test]
    async fn test_litecoin() {
        let text = "ltc1qar0srrr7xfkvy5l643lydnw9re59gtzz24wl4s";
        let address = handler(Blockchain::Litecoin).try_resolve(text).await.unwrap();
        assert_eq!(address.script_type(), Some(ScriptType::P2wpkh));
        assert_eq!(address.blockchain(), Blockchain::Litecoin);

        assert!(!handler(Blockchain::Bitcoin).can_accept(text).await);
        assert!(
            !handler(Blockchain::Litecoin)
                .can_accept("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq")
                .await
        );
    }

    #[tokio::test]
    async fn test_uppercase_is_normalized() {
        let address = handler(Blockchain::Bitcoin)
            .try_resolve("BC1QAR0SRRR7XFKVY5L643LYDNW9RE59GTZZWF5MDQ")
            .await
            .unwrap();
        assert_eq!(
            address.resolved_value(),
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"
        );
    }

    #[tokio::test]
    async fn test_produce_is_idempotent() {
        let litecoin = handler(Blockchain::Litecoin);
        let first = litecoin
            .try_resolve("LTC1QAR0SRRR7XFKVY5L643LYDNW9RE59GTZZ24WL4S")
            .await
            .unwrap();
        let second = litecoin.try_resolve(first.resolved_value()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.script_type(), Some(ScriptType::P2wpkh));
    }

    #[tokio::test]
    async fn test_rejects_invalid() {
        let bitcoin = handler(Blockchain::Bitcoin);
        // Mixed case
        assert!(!bitcoin.can_accept("bc1qAR0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq").await);
        // Checksum
        assert!(!bitcoin.can_accept("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdr").await);
        assert!(!bitcoin.can_accept("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await);
        assert!(!bitcoin.can_accept("").await);
    }

    #[test]
    fn test_unsupported_network() {
        let params = UtxoParams::for_blockchain(Blockchain::Dogecoin).unwrap();
        let result = decode("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", params);
        assert!(matches!(result, Err(SegwitError::Unsupported)));
    }
}
