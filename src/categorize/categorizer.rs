use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use super::types::{CategorizationReport, CategorizationSummary, CategorizedProduct};
use crate::config::{Config, ConfigError};
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::pipeline::{DecisionPipeline, Product};
use crate::suggest::{SuggestionBatch, SuggestionProvider};
use crate::taxonomy::{TaxonomyHandle, TaxonomyIndex};

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Batch orchestrator: suggestions, decisions and enrichment.
///
/// Cheap to clone; clones share the taxonomy handle, provider and pipeline.
#[derive(Clone)]
pub struct Categorizer {
    taxonomy: TaxonomyHandle,
    provider: Arc<dyn SuggestionProvider>,
    pipeline: Arc<DecisionPipeline>,
    batch_size: usize,
    provider_timeout: Duration,
}

impl Categorizer {
    pub fn new(
        taxonomy: TaxonomyHandle,
        provider: Arc<dyn SuggestionProvider>,
        pipeline: DecisionPipeline,
    ) -> Self {
        Self {
            taxonomy,
            provider,
            pipeline: Arc::new(pipeline),
            batch_size: DEFAULT_BATCH_SIZE,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Builds a categorizer with the pipeline, batch size and timeout from `config`.
    pub fn from_config(
        config: &Config,
        taxonomy: TaxonomyHandle,
        provider: Arc<dyn SuggestionProvider>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(taxonomy, provider, config.pipeline()?)
            .with_batch_size(config.batch_size)
            .with_provider_timeout(config.provider_timeout))
    }

    /// Sets the number of products per provider call (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn taxonomy(&self) -> &TaxonomyHandle {
        &self.taxonomy
    }

    pub fn pipeline(&self) -> &DecisionPipeline {
        &self.pipeline
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Categorizes `products`, preserving input order.
    ///
    /// All products are decided against one taxonomy snapshot, even if the handle
    /// is swapped mid-run. Provider errors and timeouts only cost the affected
    /// batch its suggestions.
    #[instrument(skip(self, products), fields(products = products.len(), batch_size = self.batch_size))]
    pub async fn categorize(&self, products: &[Product]) -> CategorizationReport {
        let started = Instant::now();
        if products.is_empty() {
            warn!("No products to categorize");
            return CategorizationReport::default();
        }

        let index = self.taxonomy.snapshot();
        let mut categorized = Vec::with_capacity(products.len());

        for (batch_no, batch) in products.chunks(self.batch_size).enumerate() {
            info!(batch = batch_no + 1, size = batch.len(), "Processing batch");
            let suggestions = self.fetch_suggestions(batch).await;
            categorized.extend(self.decide_batch(batch, &suggestions, &index));
        }

        let mut summary: CategorizationSummary = categorized.iter().collect();
        summary.elapsed = started.elapsed();
        summary.log();

        CategorizationReport {
            products: categorized,
            summary,
        }
    }

    /// Categorizes a single product.
    pub async fn categorize_one(&self, product: &Product) -> CategorizedProduct {
        let index = self.taxonomy.snapshot();
        let batch = std::slice::from_ref(product);
        let suggestions = self.fetch_suggestions(batch).await;
        let suggestion = suggestions.get(0);
        let decision = self.pipeline.decide(product, suggestion, &index);
        CategorizedProduct::assemble(product, suggestion, decision)
    }

    fn decide_batch(
        &self,
        batch: &[Product],
        suggestions: &SuggestionBatch,
        index: &TaxonomyIndex,
    ) -> Vec<CategorizedProduct> {
        batch
            .iter()
            .enumerate()
            .map(|(position, product)| {
                let suggestion = suggestions.get(position);
                let decision = self.pipeline.decide(product, suggestion, index);
                CategorizedProduct::assemble(product, suggestion, decision)
            })
            .collect()
    }

    async fn fetch_suggestions(&self, batch: &[Product]) -> SuggestionBatch {
        match tokio::time::timeout(self.provider_timeout, self.provider.suggest(batch)).await {
            Ok(Ok(suggestions)) => suggestions,
            Ok(Err(e)) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    size = batch.len(),
                    "Suggestion provider failed; using titles only"
                );
                SuggestionBatch::new()
            }
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    timeout_ms = self.provider_timeout.as_millis() as u64,
                    size = batch.len(),
                    "Suggestion provider timed out; using titles only"
                );
                SuggestionBatch::new()
            }
        }
    }
}

impl std::fmt::Debug for Categorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Categorizer")
            .field("taxonomy", &self.taxonomy)
            .field("provider", &self.provider.name())
            .field("batch_size", &self.batch_size)
            .field("provider_timeout", &self.provider_timeout)
            .finish_non_exhaustive()
    }
}
