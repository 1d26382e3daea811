//! Per-handler cache of resolved names.
//!
//! Domain handlers resolve a name inside `can_accept` and hand the stored
//! result back from `produce`. The cache is safe to share between concurrent
//! callers and is single-flight: concurrent lookups of the same text share
//! one resolution, and text that resolved once is never resolved again.
//! Failed resolutions are not stored, so a later lookup retries.

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::address::Address;
use crate::error::ResolutionError;

/// Thread-safe, single-flight map from raw input text to its resolved [`Address`].
///
/// Resolved entries are never evicted; the cache lives as long as the handler
/// owning it. Text whose resolution failed leaves no entry behind.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: DashMap<String, Arc<OnceCell<Address>>>,
}

impl ResolutionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached address for `text`, resolving it with `resolve` on a miss.
    ///
    /// Concurrent calls for the same `text` wait for the first resolution
    /// instead of starting their own. If it fails, the next waiter retries.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `resolve` when the resolution fails.
    pub async fn get_or_resolve<F, Fut>(
        &self,
        text: &str,
        resolve: F,
    ) -> Result<Address, ResolutionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Address, ResolutionError>>,
    {
        if let Some(address) = self.get(text) {
            return Ok(address);
        }
        let cell = Arc::clone(self.entries.entry(text.to_owned()).or_default().value());
        let result = cell.get_or_try_init(resolve).await.cloned();
        if result.is_err() {
            self.entries.remove_if(text, |_, cell| !cell.initialized());
        }
        result
    }

    /// Returns the cached address for `text` without resolving.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<Address> {
        self.entries
            .get(text)
            .and_then(|cell| cell.value().get().cloned())
    }

    /// Returns the number of resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Returns `true` if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
