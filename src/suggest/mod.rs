//! External semantic suggestions.
//!
//! A [`SuggestionProvider`] turns a batch of products into per-product hints:
//! formal taxonomy terms and a suggested category path. Providers may fail or
//! answer for only some products; the decision pipeline treats both as "no
//! suggestion" for the affected products.
//!
//! - [`GenAiSuggestionProvider`] asks a chat model through `genai`.
//! - [`CachedSuggestionProvider`] wraps any provider with a `moka` cache.
//! - [`StaticSuggestionProvider`] never suggests anything (offline runs).
//! - `MockSuggestionProvider` returns canned answers (tests, `mock` feature).

pub mod cache;
pub mod error;
pub mod llm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod types;

#[cfg(test)]
mod tests;

pub use cache::CachedSuggestionProvider;
pub use error::{SuggestError, SuggestResult};
pub use llm::GenAiSuggestionProvider;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSuggestionProvider;
pub use parse::{extract_json, parse_suggestions};
pub use provider::{StaticSuggestionProvider, SuggestionProvider};
pub use types::{PRODUCT_UID_PREFIX, Suggestion, SuggestionBatch, parse_product_uid, product_uid};
