//! Taxonomy dataset loading and the in-memory category index.
//!
//! [`TaxonomyIndex`] is built once and never mutated. Loading is soft: a missing,
//! malformed or empty dataset yields the seven-category emergency taxonomy so
//! ranking always has something to work with. [`TaxonomyHandle`] shares an index
//! across tasks and swaps in rebuilt ones atomically.

mod dataset;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod fixtures;
pub mod handle;
pub mod index;


pub use error::{TaxonomyError, TaxonomyResult};
pub use handle::{ReloadOutcome, TaxonomyHandle};
pub use index::{CategoryNode, EMERGENCY_CATEGORIES, IndexSource, TaxonomyIndex};
