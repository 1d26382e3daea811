//! Tron addresses.
//!
//! The canonical form is Base58Check over `0x41 || 20-byte account id`. The
//! same payload is also commonly written as 42 hex digits starting with `41`,
//! which is accepted and normalized to base58.

use chainaddr::Blockchain;

use crate::delegate::{AccountCodec, DelegateHandler};
use crate::error::AccountAddressError;

/// Version byte of every Tron address.
pub const TRON_VERSION: u8 = 0x41;

/// Length of the versioned payload.
const PAYLOAD_LEN: usize = 21;

/// Tron Base58Check addresses and their `41`-prefixed hex form.
#[derive(Debug, Clone, Copy)]
pub struct TronFormat;

impl TronFormat {
    /// Decodes either form into the 21-byte versioned payload.
    ///
    /// # Errors
    ///
    /// Returns [`AccountAddressError`] if `text` is not a Tron address.
    pub fn decode(text: &str) -> Result<Vec<u8>, AccountAddressError> {
        let payload = match hex::decode(text) {
            Ok(bytes) if bytes.first() == Some(&TRON_VERSION) => bytes,
            Ok(_) => return Err(AccountAddressError::Unsupported("hex address prefix")),
            Err(_) => bs58::decode(text).with_check(Some(TRON_VERSION)).into_vec()?,
        };
        if payload.len() != PAYLOAD_LEN {
            return Err(AccountAddressError::Length {
                expected: PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        Ok(payload)
    }
}

impl AccountCodec for TronFormat {
    const BLOCKCHAIN: Blockchain = Blockchain::Tron;

    fn canonicalize(text: &str) -> Result<String, AccountAddressError> {
        let payload = Self::decode(text)?;
        Ok(bs58::encode(payload).with_check().into_string())
    }
}

/// Native handler for Tron addresses.
pub type TronHandler = DelegateHandler<TronFormat>;
