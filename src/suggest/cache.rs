//! In-memory suggestion cache.
//!
//! Keys are BLAKE3 hashes of `(title, description)`, so identical products share
//! one entry regardless of batch or position.

use async_trait::async_trait;
use moka::sync::Cache;
use tracing::{debug, warn};

use super::error::SuggestResult;
use super::provider::SuggestionProvider;
use super::types::{Suggestion, SuggestionBatch};
use crate::hashing::hash_product;
use crate::pipeline::Product;

/// Wraps a provider and only forwards products it has not answered before.
pub struct CachedSuggestionProvider<P> {
    inner: P,
    entries: Cache<[u8; 32], Suggestion>,
}

impl<P: SuggestionProvider> CachedSuggestionProvider<P> {
    const DEFAULT_CAPACITY: u64 = 10_000;

    pub fn new(inner: P) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    pub fn with_capacity(inner: P, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Returns the cached suggestion for a product, if any.
    pub fn cached(&self, product: &Product) -> Option<Suggestion> {
        self.entries.get(&product_key(product))
    }

    /// Approximate number of cached suggestions.
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

fn product_key(product: &Product) -> [u8; 32] {
    hash_product(product.title(), product.description())
}

#[async_trait]
impl<P: SuggestionProvider> SuggestionProvider for CachedSuggestionProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Serves cached products locally and forwards the rest as one smaller batch.
    ///
    /// If the inner provider fails, cached hits are still returned; the error only
    /// surfaces when there were none.
    async fn suggest(&self, products: &[Product]) -> SuggestResult<SuggestionBatch> {
        let keys: Vec<[u8; 32]> = products.iter().map(product_key).collect();

        let mut batch = SuggestionBatch::new();
        let mut missing = Vec::new();
        for (position, key) in keys.iter().enumerate() {
            match self.entries.get(key) {
                Some(suggestion) => batch.insert(position, suggestion),
                None => missing.push(position),
            }
        }

        debug!(
            provider = self.inner.name(),
            hits = batch.len(),
            misses = missing.len(),
            "Suggestion cache lookup"
        );

        if missing.is_empty() {
            return Ok(batch);
        }

        let forwarded: Vec<Product> = missing.iter().map(|&pos| products[pos].clone()).collect();
        let fresh = match self.inner.suggest(&forwarded).await {
            Ok(fresh) => fresh,
            Err(e) if !batch.is_empty() => {
                warn!(error = %e, cached = batch.len(), "Provider failed; serving cached suggestions only");
                return Ok(batch);
            }
            Err(e) => return Err(e),
        };

        for (local, suggestion) in fresh {
            let Some(&position) = missing.get(local) else {
                debug!(position = local, "Provider answered for a product it was not sent");
                continue;
            };
            if suggestion.is_usable() {
                self.entries.insert(keys[position], suggestion.clone());
            }
            batch.insert(position, suggestion);
        }

        Ok(batch)
    }
}

impl<P> std::fmt::Debug for CachedSuggestionProvider<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSuggestionProvider")
            .field("entries", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}
