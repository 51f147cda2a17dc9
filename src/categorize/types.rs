use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::constants::{UNCATEGORIZED_LABEL, UNTITLED_PRODUCT};
use crate::pipeline::{Decision, DecisionMethod, Product};
use crate::suggest::Suggestion;

/// Output record for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedProduct {
    pub title: String,
    pub refined_title: String,
    /// Chosen category path, or `"General Marketplace"` when none was chosen.
    pub category: String,
    pub category_id: Option<String>,
    pub description: String,
    pub method: DecisionMethod,
    pub score: Option<f64>,
    pub sku: Option<Value>,
    pub price: Option<Value>,
    pub variants: Vec<Value>,
}

impl CategorizedProduct {
    /// Merges the decision, the suggestion's enrichment and the pass-through fields.
    pub fn assemble(product: &Product, suggestion: Option<&Suggestion>, decision: Decision) -> Self {
        let title = product
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_PRODUCT)
            .to_string();

        let refined_title = suggestion
            .and_then(Suggestion::refined_title)
            .map(str::to_string)
            .unwrap_or_else(|| title.clone());

        let description = suggestion
            .and_then(Suggestion::description)
            .unwrap_or(product.description())
            .to_string();

        Self {
            title,
            refined_title,
            category: decision
                .chosen_category
                .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
            category_id: decision.chosen_id,
            description,
            method: decision.method,
            score: decision.score,
            sku: product.sku.clone(),
            price: product.price.clone(),
            variants: product.variants.clone(),
        }
    }

    #[inline]
    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }
}

/// Outcome counts for one categorization run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategorizationSummary {
    pub total: usize,
    pub verified_external: usize,
    pub translated: usize,
    pub original: usize,
    pub external_failed_fallback: usize,
    /// `NO_CANDIDATES` and `COMPLETE_FAILURE`.
    pub failed: usize,
    pub elapsed: Duration,
}

impl CategorizationSummary {
    pub fn record(&mut self, method: DecisionMethod) {
        self.total += 1;
        match method {
            DecisionMethod::VerifiedExternal => self.verified_external += 1,
            DecisionMethod::TranslatedMatch | DecisionMethod::TranslatedFallback => {
                self.translated += 1
            }
            DecisionMethod::OriginalMatch | DecisionMethod::OriginalFallback => self.original += 1,
            DecisionMethod::ExternalFailedFallback => self.external_failed_fallback += 1,
            DecisionMethod::NoCandidates | DecisionMethod::CompleteFailure => self.failed += 1,
        }
    }

    /// Products that received a category.
    pub fn categorized(&self) -> usize {
        self.total - self.failed
    }

    /// Share of `count` in `total`, as a percentage.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }

    pub fn log(&self) {
        info!(
            total = self.total,
            verified_external = self.verified_external,
            translated = self.translated,
            original = self.original,
            external_failed_fallback = self.external_failed_fallback,
            failed = self.failed,
            failed_pct = %format!("{:.1}", self.percent(self.failed)),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Categorization complete"
        );
    }
}

impl<'a> FromIterator<&'a CategorizedProduct> for CategorizationSummary {
    fn from_iter<I: IntoIterator<Item = &'a CategorizedProduct>>(iter: I) -> Self {
        let mut summary = Self::default();
        for product in iter {
            summary.record(product.method);
        }
        summary
    }
}

/// Categorized products in input order plus their summary.
#[derive(Debug, Clone, Default)]
pub struct CategorizationReport {
    pub products: Vec<CategorizedProduct>,
    pub summary: CategorizationSummary,
}
