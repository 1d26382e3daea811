//! Native handler backed by a chain-specific address codec.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use chainaddr::{Address, AddressHandler, Blockchain, HandlerKind};

use crate::error::AccountAddressError;

/// Validation and normalization rules of one account-model chain.
pub trait AccountCodec: Send + Sync + 'static {
    /// The chain these rules belong to.
    const BLOCKCHAIN: Blockchain;

    /// Validates `text` and returns its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`AccountAddressError`] if `text` is not an address of the chain.
    fn canonicalize(text: &str) -> Result<String, AccountAddressError>;
}

/// Native handler delegating to an [`AccountCodec`].
pub struct DelegateHandler<C> {
    codec: PhantomData<C>,
}

impl<C: AccountCodec> DelegateHandler<C> {
    /// Creates the handler.
    #[must_use]
    pub const fn new() -> Self {
        Self { codec: PhantomData }
    }
}

impl<C: AccountCodec> Default for DelegateHandler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: AccountCodec> fmt::Debug for DelegateHandler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DelegateHandler").field(&C::BLOCKCHAIN).finish()
    }
}

#[async_trait]
impl<C: AccountCodec> AddressHandler for DelegateHandler<C> {
    fn blockchain(&self) -> Blockchain {
        C::BLOCKCHAIN
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Native
    }

    async fn can_accept(&self, text: &str) -> bool {
        let result = C::canonicalize(text);
        #[cfg(feature = "telemetry")]
        if let Err(err) = &result {
            tracing::trace!(blockchain = %C::BLOCKCHAIN, error = %err, "Rejected by codec");
        }
        result.is_ok()
    }

    fn produce(&self, text: &str) -> Address {
        let canonical =
            C::canonicalize(text).expect("produce called for text rejected by can_accept");
        Address::new(canonical, C::BLOCKCHAIN)
    }
}
