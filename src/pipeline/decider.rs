use tracing::{debug, warn};

use super::strategy::{DecisionContext, StrategyChain};
use super::types::{Decision, Product};
use crate::constants::DEFAULT_AUTO_ACCEPT_SCORE;
use crate::ranking::Ranker;
use crate::suggest::Suggestion;
use crate::taxonomy::TaxonomyIndex;

/// Reconciles an external suggestion with local ranking for one product.
///
/// [`decide`](Self::decide) is a pure function of its arguments; a pipeline can be
/// shared across tasks and the outcome never depends on what else is in the batch.
#[derive(Debug)]
pub struct DecisionPipeline {
    ranker: Ranker,
    auto_accept_score: f64,
    assisted: StrategyChain,
    unassisted: StrategyChain,
}

impl Default for DecisionPipeline {
    fn default() -> Self {
        Self::new(Ranker::default(), DEFAULT_AUTO_ACCEPT_SCORE)
    }
}

impl DecisionPipeline {
    pub fn new(ranker: Ranker, auto_accept_score: f64) -> Self {
        Self::with_chains(
            ranker,
            auto_accept_score,
            StrategyChain::assisted(),
            StrategyChain::unassisted(),
        )
    }

    /// Builds a pipeline with custom chains for usable and missing suggestions.
    pub fn with_chains(
        ranker: Ranker,
        auto_accept_score: f64,
        assisted: StrategyChain,
        unassisted: StrategyChain,
    ) -> Self {
        Self {
            ranker,
            auto_accept_score,
            assisted,
            unassisted,
        }
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    pub fn auto_accept_score(&self) -> f64 {
        self.auto_accept_score
    }

    pub fn assisted_chain(&self) -> &StrategyChain {
        &self.assisted
    }

    pub fn unassisted_chain(&self) -> &StrategyChain {
        &self.unassisted
    }

    /// Picks a category for `product`.
    ///
    /// A suggestion that carries neither a category nor any translated term counts
    /// as no suggestion at all.
    pub fn decide(
        &self,
        product: &Product,
        suggestion: Option<&Suggestion>,
        index: &TaxonomyIndex,
    ) -> Decision {
        let suggestion = suggestion.filter(|s| s.is_usable());
        let ctx = DecisionContext {
            product,
            suggestion,
            index,
            ranker: &self.ranker,
            auto_accept_score: self.auto_accept_score,
        };

        let decision = match suggestion {
            Some(_) => self.assisted.run(&ctx),
            None => self.unassisted.run(&ctx),
        };

        if decision.method.is_failure() {
            warn!(
                title = %decision.input_title,
                method = %decision.method,
                "No category found"
            );
        } else {
            debug!(
                title = %decision.input_title,
                category = decision.chosen_category.as_deref().unwrap_or_default(),
                method = %decision.method,
                score = decision.score,
                "Product categorized"
            );
        }

        decision
    }
}
