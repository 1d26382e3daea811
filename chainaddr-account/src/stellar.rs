//! Stellar account ids (`G...` strkeys).

use chainaddr::Blockchain;
use stellar_strkey::ed25519::PublicKey;

use crate::delegate::{AccountCodec, DelegateHandler};
use crate::error::AccountAddressError;

/// Ed25519 public-key strkeys, as parsed by the Stellar SDK.
#[derive(Debug, Clone, Copy)]
pub struct StellarFormat;

impl AccountCodec for StellarFormat {
    const BLOCKCHAIN: Blockchain = Blockchain::Stellar;

    fn canonicalize(text: &str) -> Result<String, AccountAddressError> {
        PublicKey::from_string(text).map_err(|e| AccountAddressError::rejected(Self::BLOCKCHAIN, e))?;
        Ok(text.to_owned())
    }
}

/// Native handler for Stellar addresses.
pub type StellarHandler = DelegateHandler<StellarFormat>;
