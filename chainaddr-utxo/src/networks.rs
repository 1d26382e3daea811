//! Per-network address parameters for UTXO chains.

use chainaddr::Blockchain;

/// Address encoding constants of a UTXO network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtxoParams {
    /// The blockchain these parameters belong to.
    pub blockchain: Blockchain,
    /// Base58Check version byte of pay-to-pubkey-hash addresses.
    pub pubkey_hash: u8,
    /// Base58Check version byte of pay-to-script-hash addresses.
    pub script_hash: u8,
    /// Human-readable part of segwit addresses, if the network has segwit.
    pub segwit_hrp: Option<&'static str>,
    /// CashAddr prefix, if the network uses CashAddr.
    pub cashaddr_prefix: Option<&'static str>,
}

impl UtxoParams {
    /// Looks up the parameters of a UTXO blockchain.
    ///
    /// Returns `None` for chains outside the UTXO family.
    #[must_use]
    pub fn for_blockchain(blockchain: Blockchain) -> Option<&'static Self> {
        UTXO_NETWORKS.iter().find(|p| p.blockchain == blockchain)
    }
}

/// Address parameters of every supported UTXO network.
pub static UTXO_NETWORKS: &[UtxoParams] = &[
    UtxoParams {
        blockchain: Blockchain::Bitcoin,
        pubkey_hash: 0x00,
        script_hash: 0x05,
        segwit_hrp: Some("bc"),
        cashaddr_prefix: None,
    },
    UtxoParams {
        blockchain: Blockchain::BitcoinCash,
        pubkey_hash: 0x00,
        script_hash: 0x05,
        segwit_hrp: None,
        cashaddr_prefix: Some("bitcoincash"),
    },
    UtxoParams {
        blockchain: Blockchain::ECash,
        pubkey_hash: 0x00,
        script_hash: 0x05,
        segwit_hrp: None,
        cashaddr_prefix: Some("ecash"),
    },
    UtxoParams {
        blockchain: Blockchain::Litecoin,
        pubkey_hash: 0x30,
        script_hash: 0x32,
        segwit_hrp: Some("ltc"),
        cashaddr_prefix: None,
    },
    UtxoParams {
        blockchain: Blockchain::Dash,
        pubkey_hash: 0x4c,
        script_hash: 0x10,
        segwit_hrp: None,
        cashaddr_prefix: None,
    },
    UtxoParams {
        blockchain: Blockchain::Dogecoin,
        pubkey_hash: 0x1e,
        script_hash: 0x16,
        segwit_hrp: None,
        cashaddr_prefix: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chainaddr::AddressFamily;

    #[test]
    fn test_every_utxo_chain_has_params() {
        for blockchain in Blockchain::ALL {
            let has_params = UtxoParams::for_blockchain(*blockchain).is_some();
            assert_eq!(has_params, blockchain.family() == AddressFamily::Utxo, "{blockchain}");
        }
    }

    #[test]
    fn test_litecoin_params() {
        let params = UtxoParams::for_blockchain(Blockchain::Litecoin).unwrap();
        assert_eq!(params.pubkey_hash, 0x30);
        assert_eq!(params.segwit_hrp, Some("ltc"));
        assert!(params.cashaddr_prefix.is_none());
    }
}
