//! MistralApiAgent - Direct REST API implementation for Mistral chat completions.
//!
//! Settings are resolved by the caller (see `supportdesk-infrastructure`) and
//! passed in explicitly; this module never reads the environment.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use supportdesk_core::completion::{ChatCompletionService, CompletionError, ResponseFormat};
use supportdesk_core::config::CompletionSettings;

/// Completion client that talks to the Mistral HTTP API.
#[derive(Clone)]
pub struct MistralApiAgent {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl MistralApiAgent {
    /// Builds an agent from resolved settings.
    ///
    /// `settings.base_url` may point at a proxy or a mock server.
    pub fn from_settings(settings: &CompletionSettings) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| CompletionError::Transport {
            message: format!("Failed to build HTTP client: {err}"),
            is_retryable: false,
        })?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            endpoint: chat_completions_url(&settings.base_url),
        })
    }

    fn build_request<'a>(
        &'a self,
        prompt: &'a str,
        format: ResponseFormat,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: format.is_json().then_some(ResponseFormatBody {
                r#type: "json_object",
            }),
        }
    }

    async fn send_request(
        &self,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| CompletionError::Transport {
                message: format!("Mistral API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Mistral error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            CompletionError::Parse(format!("Failed to parse Mistral response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ChatCompletionService for MistralApiAgent {
    async fn complete(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, CompletionError> {
        let request = self.build_request(prompt, format);
        tracing::debug!(model = %self.model, json = format.is_json(), "sending chat completion");
        self.send_request(&request).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatBody>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormatBody {
    r#type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

// Mistral reports errors either as {"message": ...} or OpenAI-style
// {"error": {"message": ...}}.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorResponse {
    Nested { error: ErrorBody },
    Flat { message: serde_json::Value },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> CompletionError {
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(ErrorResponse::Nested { error }) => error.message,
        Ok(ErrorResponse::Flat { message }) => match message {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        },
        Err(_) => body,
    };

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    CompletionError::Api {
        status: status.as_u16(),
        message,
        is_retryable,
    }
}
