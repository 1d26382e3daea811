//! Universal domain registry constants.

/// Default registry API base URL.
pub const DEFAULT_UDN_URL: &str = "https://api.unstoppabledomains.com/";

/// Path, relative to the base URL, under which domains are resolved.
pub const DOMAINS_PATH: &str = "./resolve/domains/";

/// Builds the record key holding the address for `coin_code`, optionally
/// narrowed to one chain of a multi-chain token.
///
/// ```
/// use chainaddr_http::constants::record_key;
///
/// assert_eq!(record_key("eth", None), "crypto.ETH.address");
/// assert_eq!(record_key("USDT", Some("ERC20")), "crypto.USDT.version.ERC20.address");
/// ```
#[must_use]
pub fn record_key(coin_code: &str, chain: Option<&str>) -> String {
    let coin_code = coin_code.to_uppercase();
    match chain {
        Some(chain) => format!("crypto.{coin_code}.version.{chain}.address"),
        None => format!("crypto.{coin_code}.address"),
    }
}
