//! Chat completion capability.
//!
//! The single outbound dependency of the support flow. Implementations live in
//! `supportdesk-interaction`; the core only sees this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Requested shape of the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A single JSON object (provider-enforced JSON mode).
    JsonObject,
}

impl ResponseFormat {
    pub fn is_json(self) -> bool {
        matches!(self, Self::JsonObject)
    }
}

/// Errors raised by a [`ChatCompletionService`].
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response (connect, DNS, timeout).
    #[error("Completion request failed: {message}")]
    Transport { message: String, is_retryable: bool },

    /// The provider answered with a non-success status.
    #[error("Completion API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        is_retryable: bool,
    },

    /// The provider answered but returned no message content.
    #[error("Completion API returned no content")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("Failed to parse completion response: {0}")]
    Parse(String),
}

impl CompletionError {
    /// Whether a caller could reasonably try again. Nothing in this workspace
    /// retries; the flag is kept for logging.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { is_retryable, .. } | Self::Api { is_retryable, .. } => *is_retryable,
            Self::EmptyResponse | Self::Parse(_) => false,
        }
    }
}

/// Turns a prompt into model-generated text.
#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    /// Sends `prompt` as a single user message and returns the reply text.
    async fn complete(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, CompletionError>;

    /// Model identifier, for display and logging.
    fn model(&self) -> &str;
}
