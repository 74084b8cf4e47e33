//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from generation backend calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl LlmError {
    /// Whether this is a server-side failure (5xx, rate limiting, connection
    /// trouble) rather than a problem with the request itself.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(e) => !e.is_builder() && !e.is_decode(),
            Self::HttpStatus { code, .. } => *code == 429 || (500..600).contains(code),
            Self::JsonParse { .. } | Self::ClientInit(_) => false,
        }
    }
}
