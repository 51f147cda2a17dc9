use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("provider request failed: {0}")]
    Provider(#[from] genai::Error),

    #[error("provider returned no text content")]
    EmptyResponse,

    #[error("malformed suggestion response: {reason}")]
    MalformedResponse { reason: String },

    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("suggestion provider unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type SuggestResult<T> = Result<T, SuggestError>;
