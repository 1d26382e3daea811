//! TON (The Open Network) addresses.
//!
//! Two textual forms exist. The raw form is `workchain:hex64`. The
//! user-friendly form is 48 characters of base64 or base64url over
//! `flags || workchain || 32-byte hash || crc16`, where the CRC is
//! CRC-16/XMODEM in big-endian order.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use chainaddr::Blockchain;
use crc::{CRC_16_XMODEM, Crc};

use crate::delegate::{AccountCodec, DelegateHandler};
use crate::error::AccountAddressError;

const TON_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

const FRIENDLY_LEN: usize = 48;
const DECODED_LEN: usize = 36;

const BOUNCEABLE: u8 = 0x11;
const NON_BOUNCEABLE: u8 = 0x51;
const TESTNET_FLAG: u8 = 0x80;

/// Basechain and masterchain, the only workchains in use.
const WORKCHAINS: [i8; 2] = [0, -1];

/// Raw and user-friendly mainnet TON addresses.
#[derive(Debug, Clone, Copy)]
pub struct TonFormat;

impl AccountCodec for TonFormat {
    const BLOCKCHAIN: Blockchain = Blockchain::Ton;

    fn canonicalize(text: &str) -> Result<String, AccountAddressError> {
        match text.split_once(':') {
            Some((workchain, hash)) => validate_raw(workchain, hash)?,
            None => validate_friendly(text)?,
        }
        Ok(text.to_owned())
    }
}

fn validate_raw(workchain: &str, hash: &str) -> Result<(), AccountAddressError> {
    let workchain: i8 = workchain
        .parse()
        .map_err(|_| AccountAddressError::Unsupported("workchain"))?;
    if !WORKCHAINS.contains(&workchain) {
        return Err(AccountAddressError::Unsupported("workchain"));
    }
    let hash = hex::decode(hash)?;
    if hash.len() != 32 {
        return Err(AccountAddressError::Length {
            expected: 32,
            actual: hash.len(),
        });
    }
    Ok(())
}

fn validate_friendly(text: &str) -> Result<(), AccountAddressError> {
    if text.len() != FRIENDLY_LEN {
        return Err(AccountAddressError::Length {
            expected: DECODED_LEN,
            actual: text.len() * 3 / 4,
        });
    }
    let bytes = URL_SAFE.decode(text).or_else(|_| STANDARD.decode(text))?;
    let Ok(bytes) = <[u8; DECODED_LEN]>::try_from(bytes.as_slice()) else {
        return Err(AccountAddressError::Length {
            expected: DECODED_LEN,
            actual: bytes.len(),
        });
    };

    let flags = bytes[0];
    if flags & TESTNET_FLAG != 0 {
        return Err(AccountAddressError::Network);
    }
    if flags != BOUNCEABLE && flags != NON_BOUNCEABLE {
        return Err(AccountAddressError::Unsupported("address flags"));
    }
    if !WORKCHAINS.contains(&i8::from_be_bytes([bytes[1]])) {
        return Err(AccountAddressError::Unsupported("workchain"));
    }
    let expected = u16::from_be_bytes([bytes[34], bytes[35]]);
    if TON_CRC.checksum(&bytes[..34]) != expected {
        return Err(AccountAddressError::Checksum);
    }
    Ok(())
}

/// Native handler for TON addresses.
pub type TonHandler = DelegateHandler<TonFormat>;
