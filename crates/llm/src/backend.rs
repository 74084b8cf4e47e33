use async_trait::async_trait;

use crate::error::LlmError;

/// Something that turns a prompt into a candidate devotional.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// One generation call against `model`. `Ok(None)` means the backend
    /// answered but produced no text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, LlmError>;
}
