use std::time::Duration;

use async_trait::async_trait;
use devotional_core::BackendConfig;

use crate::ai_types::{ChatRequest, ChatResponse, Message};
use crate::backend::GenerationBackend;
use crate::error::LlmError;

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LlmClient {
    /// Creates a new client. `base_url` is the API root, e.g.
    /// `https://generativelanguage.googleapis.com/v1beta/openai`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> Result<Self, LlmError> {
        Self::new(
            config.api_key.clone(),
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one chat completion request and return the first choice's
    /// content. Blank or missing content is `Ok(None)`.
    ///
    /// No retries happen here; the caller owns the attempt budget.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, or the response body cannot be parsed.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<Option<String>, LlmError> {
        tracing::debug!(model = %request.model, base_url = %self.base_url, "sending chat completion");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        tracing::debug!(model = %request.model, bytes = body.len(), "chat completion received");
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty()))
    }
}

#[async_trait]
impl GenerationBackend for LlmClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, LlmError> {
        let request = ChatRequest {
            model: model.to_owned(),
            messages: vec![Message { role: "user".to_owned(), content: prompt.to_owned() }],
        };
        self.chat_completion(&request).await
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
