use std::sync::Arc;

use async_trait::async_trait;

use super::error::SuggestResult;
use super::types::SuggestionBatch;
use crate::pipeline::Product;

/// Source of semantic hints for a batch of products.
///
/// Entries in the returned batch are keyed by position in `products`. A product may
/// be missing from the batch; an `Err` means the whole batch got nothing.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn suggest(&self, products: &[Product]) -> SuggestResult<SuggestionBatch>;
}

#[async_trait]
impl<P: SuggestionProvider + ?Sized> SuggestionProvider for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn suggest(&self, products: &[Product]) -> SuggestResult<SuggestionBatch> {
        (**self).suggest(products).await
    }
}

/// Provider that never suggests anything; every product takes the unassisted chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSuggestionProvider;

#[async_trait]
impl SuggestionProvider for StaticSuggestionProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn suggest(&self, _products: &[Product]) -> SuggestResult<SuggestionBatch> {
        Ok(SuggestionBatch::new())
    }
}
