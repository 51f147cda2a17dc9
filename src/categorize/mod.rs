//! Batch categorization.
//!
//! [`Categorizer`] splits products into provider-sized batches, asks the
//! suggestion provider once per batch, runs every product through the decision
//! pipeline and assembles [`CategorizedProduct`] records with a run summary.

pub mod categorizer;
pub mod types;


pub use categorizer::Categorizer;
pub use types::{CategorizationReport, CategorizationSummary, CategorizedProduct};
