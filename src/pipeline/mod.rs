//! Per-product decision chain.
//!
//! A usable suggestion runs [`StrategyChain::assisted`]: verify the suggested
//! path, rank the translated terms, rank the raw title, else `NO_CANDIDATES`.
//! Without one, [`StrategyChain::unassisted`] ranks the raw title and ends in
//! `COMPLETE_FAILURE`. Failures are terminal outcomes, never errors.

pub mod decider;
pub mod strategy;
pub mod types;


pub use decider::DecisionPipeline;
pub use strategy::{
    DecisionContext, DecisionStrategy, ExternalFailedSearch, ExternalVerification, OriginalSearch,
    StrategyChain, TranslatedSearch, normalize_ampersands, verify_suggested_path,
};
pub use types::{Decision, DecisionMethod, Product};
