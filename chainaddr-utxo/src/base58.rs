//! Legacy Base58Check addresses.
//!
//! A Base58Check address is `version || hash160 || checksum`, where the
//! checksum is the first four bytes of a double SHA-256. The version byte
//! tells pay-to-pubkey-hash from pay-to-script-hash and identifies the
//! network.

use async_trait::async_trait;
use chainaddr::{Address, AddressHandler, Blockchain, HandlerKind, ScriptType};

use crate::networks::UtxoParams;

/// Length of a decoded payload: one version byte plus a 20-byte hash.
const PAYLOAD_LEN: usize = 21;

/// Errors from decoding a Base58Check address.
#[derive(Debug, thiserror::Error)]
pub enum Base58CheckError {
    /// The text is not valid base58 or its checksum does not match.
    #[error("Invalid base58check encoding: {0}")]
    Encoding(#[from] bs58::decode::Error),
    /// The payload is not a version byte followed by a 20-byte hash.
    #[error("Invalid payload length {0}")]
    Length(usize),
    /// The version byte does not belong to the network.
    #[error("Unknown version byte {0:#04x}")]
    Version(u8),
}

/// Decodes a Base58Check address with the network's version bytes.
///
/// # Errors
///
/// Returns [`Base58CheckError`] if the encoding, checksum, length or version is invalid.
pub fn decode(text: &str, params: &UtxoParams) -> Result<(ScriptType, [u8; 20]), Base58CheckError> {
    let payload = bs58::decode(text).with_check(None).into_vec()?;
    let Ok(payload) = <[u8; PAYLOAD_LEN]>::try_from(payload.as_slice()) else {
        return Err(Base58CheckError::Length(payload.len()));
    };
    let script_type = match payload[0] {
        v if v == params.pubkey_hash => ScriptType::P2pkh,
        v if v == params.script_hash => ScriptType::P2sh,
        v => return Err(Base58CheckError::Version(v)),
    };
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((script_type, hash))
}

/// Encodes a hash as a Base58Check address with the given version byte.
#[must_use]
pub fn encode(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.push(version);
    payload.extend_from_slice(hash);
    bs58::encode(payload).with_check().into_string()
}

/// Native handler for legacy Base58Check addresses of one UTXO network.
#[derive(Debug, Clone, Copy)]
pub struct Base58Handler {
    params: &'static UtxoParams,
}

impl Base58Handler {
    /// Creates a handler for the network described by `params`.
    #[must_use]
    pub const fn new(params: &'static UtxoParams) -> Self {
        Self { params }
    }
}

#[async_trait]
impl AddressHandler for Base58Handler {
    fn blockchain(&self) -> Blockchain {
        self.params.blockchain
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Native
    }

    async fn can_accept(&self, text: &str) -> bool {
        decode(text, self.params).is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        let (script_type, hash) =
            decode(text, self.params).expect("produce called for text rejected by can_accept");
        let version = match script_type {
            ScriptType::P2sh => self.params.script_hash,
            _ => self.params.pubkey_hash,
        };
        Address::utxo(encode(version, &hash), self.params.blockchain, script_type)
    }
}
