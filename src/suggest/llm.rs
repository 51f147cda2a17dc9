use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponseFormat};
use tracing::{debug, instrument, warn};

use super::error::{SuggestError, SuggestResult};
use super::parse::parse_suggestions;
use super::prompt::{SYSTEM_PROMPT, render_batch};
use super::provider::SuggestionProvider;
use super::types::SuggestionBatch;
use crate::constants::DEFAULT_MODEL;
use crate::pipeline::Product;

/// Suggestion provider backed by a chat model through `genai`.
///
/// The provider (Gemini, OpenAI, Anthropic, ...) is resolved by `genai` from the
/// model name, and credentials come from that provider's usual environment variable.
#[derive(Clone)]
pub struct GenAiSuggestionProvider {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl GenAiSuggestionProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default().with_response_format(ChatResponseFormat::JsonMode),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Options sent with every request; replies are requested as JSON.
    pub(crate) fn chat_options(&self) -> &ChatOptions {
        &self.options
    }

    fn build_request(products: &[Product]) -> SuggestResult<ChatRequest> {
        let payload = render_batch(products)?;
        Ok(ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(payload),
        ]))
    }
}

impl Default for GenAiSuggestionProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl std::fmt::Debug for GenAiSuggestionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiSuggestionProvider")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SuggestionProvider for GenAiSuggestionProvider {
    fn name(&self) -> &'static str {
        "genai"
    }

    #[instrument(skip(self, products), fields(model = %self.model, batch_size = products.len()))]
    async fn suggest(&self, products: &[Product]) -> SuggestResult<SuggestionBatch> {
        if products.is_empty() {
            return Ok(SuggestionBatch::new());
        }

        let request = Self::build_request(products)?;
        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await?;
        let text = response.first_text().ok_or(SuggestError::EmptyResponse)?;

        let batch = parse_suggestions(text).inspect_err(|e| {
            warn!(error = %e, reply_len = text.len(), "Could not decode model reply");
        })?;

        if batch.len() < products.len() {
            debug!(
                requested = products.len(),
                received = batch.len(),
                "Model reply is missing some products"
            );
        }

        Ok(batch)
    }
}
