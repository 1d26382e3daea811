//! CashAddr addresses used by Bitcoin Cash and eCash.
//!
//! A CashAddr is `prefix:payload`, where the payload is base32 (the bech32
//! alphabet) over `version || hash || checksum`. The 40-bit checksum covers
//! the prefix as well, so a payload is only valid under its own network's
//! prefix. The prefix may be omitted on input; output always carries it.

use async_trait::async_trait;
use bech32::Fe32;
use chainaddr::{Address, AddressHandler, Blockchain, HandlerKind, ScriptType};

use crate::networks::UtxoParams;

/// Number of base32 characters in the checksum.
const CHECKSUM_LEN: usize = 8;

const GENERATORS: [u64; 5] = [
    0x98_f2bc_8e61,
    0x79_b76d_99e2,
    0xf3_3e5f_b3c4,
    0xae_2eab_e2a8,
    0x1e_4f43_e470,
];

/// Errors from decoding a CashAddr address.
#[derive(Debug, thiserror::Error)]
pub enum CashAddrError {
    /// The network does not use CashAddr.
    #[error("Network has no CashAddr addresses")]
    Unsupported,
    /// The text mixes upper and lower case.
    #[error("Mixed-case CashAddr")]
    MixedCase,
    /// The prefix belongs to another network.
    #[error("Unexpected prefix {0:?}")]
    Prefix(String),
    /// A payload character is outside the base32 alphabet.
    #[error("Invalid character {0:?}")]
    Character(char),
    /// The payload is too short to hold a checksum.
    #[error("Payload too short")]
    TooShort,
    /// The checksum does not match.
    #[error("Invalid checksum")]
    Checksum,
    /// The payload has non-zero or excess padding bits.
    #[error("Invalid padding")]
    Padding,
    /// The version byte names an unknown type or a hash size other than 160 bits.
    #[error("Unsupported version byte {0:#04x}")]
    Version(u8),
    /// The hash length does not match the version byte.
    #[error("Invalid hash length {0}")]
    Length(usize),
}

/// A successfully decoded CashAddr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAddr {
    /// Pay-to-pubkey-hash or pay-to-script-hash.
    pub script_type: ScriptType,
    /// The 20-byte hash.
    pub hash: [u8; 20],
    /// Lowercase `prefix:payload` form.
    pub canonical: String,
}

/// Decodes a CashAddr with the network's prefix.
///
/// # Errors
///
/// Returns [`CashAddrError`] if the text is not a valid CashAddr of the network.
pub fn decode(text: &str, params: &UtxoParams) -> Result<CashAddr, CashAddrError> {
    let expected = params.cashaddr_prefix.ok_or(CashAddrError::Unsupported)?;
    if text.chars().any(|c| c.is_ascii_lowercase()) && text.chars().any(|c| c.is_ascii_uppercase())
    {
        return Err(CashAddrError::MixedCase);
    }
    let lower = text.to_ascii_lowercase();
    let payload = match lower.split_once(':') {
        Some((prefix, payload)) if prefix == expected => payload,
        Some((prefix, _)) => return Err(CashAddrError::Prefix(prefix.to_owned())),
        None => lower.as_str(),
    };

    let values = payload
        .chars()
        .map(|c| {
            Fe32::from_char(c)
                .map(Fe32::to_u8)
                .map_err(|_| CashAddrError::Character(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    if values.len() <= CHECKSUM_LEN {
        return Err(CashAddrError::TooShort);
    }

    let prefix = expand_prefix(expected);
    if polymod(prefix.iter().chain(&values).copied()) != 0 {
        return Err(CashAddrError::Checksum);
    }

    let data = from_base32(&values[..values.len() - CHECKSUM_LEN])?;
    let (&version, hash) = data.split_first().ok_or(CashAddrError::Length(0))?;
    let script_type = match (version >> 3) & 0x0f {
        0 => ScriptType::P2pkh,
        1 => ScriptType::P2sh,
        _ => return Err(CashAddrError::Version(version)),
    };
    // Size bits 0 mean a 160-bit hash, the only size in use on these networks.
    if version & 0x07 != 0 || version & 0x80 != 0 {
        return Err(CashAddrError::Version(version));
    }
    let hash = <[u8; 20]>::try_from(hash).map_err(|_| CashAddrError::Length(hash.len()))?;

    Ok(CashAddr {
        script_type,
        hash,
        canonical: format!("{expected}:{payload}"),
    })
}

/// Lower five bits of every prefix byte, followed by the zero separator.
fn expand_prefix(prefix: &str) -> Vec<u8> {
    prefix.bytes().map(|b| b & 0x1f).chain([0]).collect()
}

fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = c >> 35;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 == 1 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Regroups 5-bit values into bytes, rejecting non-zero or oversized padding.
#[allow(clippy::cast_possible_truncation)]
fn from_base32(values: &[u8]) -> Result<Vec<u8>, CashAddrError> {
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    let mut out = Vec::with_capacity(values.len() * 5 / 8);
    for &value in values {
        acc = ((acc << 5) | u32::from(value)) & 0xfff;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
        }
    }
    if bits >= 5 || acc & ((1 << bits) - 1) != 0 {
        return Err(CashAddrError::Padding);
    }
    Ok(out)
}

/// Native handler for CashAddr addresses of one network.
#[derive(Debug, Clone, Copy)]
pub struct CashAddrHandler {
    params: &'static UtxoParams,
}

impl CashAddrHandler {
    /// Creates a handler for the network described by `params`.
    #[must_use]
    pub const fn new(params: &'static UtxoParams) -> Self {
        Self { params }
    }
}

#[async_trait]
impl AddressHandler for CashAddrHandler {
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
            tracing::trace!(blockchain = %self.params.blockchain, error = %err, "CashAddr decode failed");
        }
        result.is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        let decoded =
            decode(text, self.params).expect("produce called for text rejected by can_accept");
        Address::utxo(decoded.canonical, self.params.blockchain, decoded.script_type)
    }
}
