use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while reading or interpreting a taxonomy dataset.
///
/// [`TaxonomyIndex::build`](super::TaxonomyIndex::build) and
/// [`TaxonomyIndex::load`](super::TaxonomyIndex::load) never return these; they log
/// them and fall back to the emergency taxonomy. The `try_*` variants surface them.
pub enum TaxonomyError {
    /// The dataset file could not be read.
    #[error("failed to read taxonomy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON.
    #[error("taxonomy dataset is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The JSON is neither a flat category list nor a `verticals` object.
    #[error("unrecognized taxonomy structure: {reason}")]
    UnrecognizedSchema { reason: String },

    /// The dataset parsed but contained no record with both a name and an id.
    #[error("taxonomy dataset contains no usable categories")]
    Empty,
}

/// Convenience result type for taxonomy operations.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;
