use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{SuggestError, SuggestResult};
use super::provider::SuggestionProvider;
use super::types::{Suggestion, SuggestionBatch};
use crate::pipeline::Product;

/// Provider returning canned suggestions keyed by product title.
///
/// Products without a canned entry get no suggestion. Call and batch counts are
/// recorded for assertions.
#[derive(Debug, Default)]
pub struct MockSuggestionProvider {
    responses: HashMap<String, Suggestion>,
    failing: AtomicBool,
    delay: Option<Duration>,
    calls: AtomicUsize,
    batch_sizes: Mutex<Vec<usize>>,
}

impl MockSuggestionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggestion(mut self, title: impl Into<String>, suggestion: Suggestion) -> Self {
        self.responses.insert(title.into(), suggestion);
        self
    }

    /// Every call fails with [`SuggestError::Unavailable`].
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.set_failing(true);
        provider
    }

    /// Sleeps before answering, to exercise caller timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Size of every batch received, in call order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().clone()
    }

    /// Total number of products received across all calls.
    pub fn products_seen(&self) -> usize {
        self.batch_sizes.lock().iter().sum()
    }
}

#[async_trait]
impl SuggestionProvider for MockSuggestionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn suggest(&self, products: &[Product]) -> SuggestResult<SuggestionBatch> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().push(products.len());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(SuggestError::Unavailable {
                reason: "mock provider set to fail".to_string(),
            });
        }

        Ok(products
            .iter()
            .enumerate()
            .filter_map(|(i, product)| {
                self.responses
                    .get(product.title())
                    .map(|suggestion| (i, suggestion.clone()))
            })
            .collect())
    }
}
