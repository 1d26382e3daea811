//! EIP-55 hex addresses shared by every EVM chain.

use alloy_primitives::Address as EvmAddress;
use alloy_primitives::hex::FromHexError;
use async_trait::async_trait;
use chainaddr::{Address, AddressHandler, Blockchain, HandlerKind};

/// Number of hex digits in an EVM address.
const HEX_LEN: usize = 40;

/// Errors from parsing an EVM address.
#[derive(Debug, thiserror::Error)]
pub enum EvmAddressError {
    /// The text does not start with `0x`.
    #[error("Missing 0x prefix")]
    MissingPrefix,
    /// The text does not have exactly 40 hex digits after the prefix.
    #[error("Expected 40 hex digits, found {0}")]
    Length(usize),
    /// The text contains a non-hex character.
    #[error("Invalid hex: {0}")]
    Hex(#[from] FromHexError),
    /// Mixed-case text whose casing does not match its EIP-55 checksum.
    #[error("EIP-55 checksum mismatch")]
    Checksum,
}

/// Parses a `0x`-prefixed EVM address.
///
/// All-lowercase and all-uppercase digits are accepted as-is. Mixed-case
/// digits must form a valid EIP-55 checksum.
///
/// # Errors
///
/// Returns [`EvmAddressError`] if the text is not a valid address.
pub fn parse(text: &str) -> Result<EvmAddress, EvmAddressError> {
    let digits = text.strip_prefix("0x").ok_or(EvmAddressError::MissingPrefix)?;
    if digits.len() != HEX_LEN {
        return Err(EvmAddressError::Length(digits.len()));
    }
    let address = digits.parse::<EvmAddress>()?;
    let mixed_case = digits.bytes().any(|b| b.is_ascii_lowercase())
        && digits.bytes().any(|b| b.is_ascii_uppercase());
    if mixed_case && EvmAddress::parse_checksummed(text, None).is_err() {
        return Err(EvmAddressError::Checksum);
    }
    Ok(address)
}

/// Native handler for EVM addresses on one EVM chain.
///
/// Produces the EIP-55 checksummed form.
#[derive(Debug, Clone, Copy)]
pub struct EvmHandler {
    blockchain: Blockchain,
}

impl EvmHandler {
    /// Creates a handler bound to `blockchain`.
    #[must_use]
    pub const fn new(blockchain: Blockchain) -> Self {
        Self { blockchain }
    }
}

#[async_trait]
impl AddressHandler for EvmHandler {
    fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Native
    }

    async fn can_accept(&self, text: &str) -> bool {
        parse(text).is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        let address = parse(text).expect("produce called for text rejected by can_accept");
        Address::new(address.to_checksum(None), self.blockchain)
    }
}
