//! ENS deployment constants.

use alloy_primitives::{Address, address};

/// ENS registry with fallback, deployed at the same address on mainnet and testnets.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Selector of `resolver(bytes32)` on the registry.
pub const RESOLVER_SELECTOR: [u8; 4] = [0x01, 0x78, 0xb8, 0xbf];

/// Selector of `addr(bytes32)` on a resolver.
pub const ADDR_SELECTOR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde];

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_selectors_match_signatures() {
        assert_eq!(keccak256("resolver(bytes32)")[..4], RESOLVER_SELECTOR);
        assert_eq!(keccak256("addr(bytes32)")[..4], ADDR_SELECTOR);
    }
}
