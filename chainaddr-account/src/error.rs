//! Errors from account-model address codecs.

use chainaddr::Blockchain;

/// Failure to parse an account-model address.
///
/// Handlers collapse this to `false`; it is public for callers that use the
/// codecs directly.
#[derive(Debug, thiserror::Error)]
pub enum AccountAddressError {
    /// The text is not valid base58 or its checksum does not match.
    #[error("Invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    /// The text is not valid base64.
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The text is not valid hex.
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded payload has the wrong size.
    #[error("Expected {expected} bytes, found {actual}")]
    Length {
        /// Required payload size.
        expected: usize,
        /// Decoded payload size.
        actual: usize,
    },

    /// An embedded checksum does not match.
    #[error("Checksum mismatch")]
    Checksum,

    /// The text is well-formed but uses a variant this codec does not accept.
    #[error("Unsupported {0}")]
    Unsupported(&'static str),

    /// The address belongs to a test network.
    #[error("Not a mainnet address")]
    Network,

    /// The chain SDK rejected the address.
    #[error("{blockchain} rejected the address: {reason}")]
    Rejected {
        /// The chain whose SDK was consulted.
        blockchain: Blockchain,
        /// The SDK's error message.
        reason: String,
    },
}

impl AccountAddressError {
    pub(crate) fn rejected(blockchain: Blockchain, reason: impl std::fmt::Display) -> Self {
        Self::Rejected {
            blockchain,
            reason: reason.to_string(),
        }
    }
}
