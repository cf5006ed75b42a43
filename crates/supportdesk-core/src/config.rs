//! Configuration models.
//!
//! `secret.json` carries credentials, `config.toml` carries non-secret
//! settings. Both are resolved once at startup into a [`CompletionSettings`]
//! that is handed to the completion client explicitly.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MISTRAL_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub mistral: Option<MistralConfig>,
}

/// Mistral API credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MistralConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Root structure of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub completion: CompletionOptions,
}

/// `[completion]` table of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CompletionOptions {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Fully resolved settings for the completion client.
#[derive(Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl CompletionSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MISTRAL_MODEL.to_string(),
            base_url: DEFAULT_MISTRAL_BASE_URL.to_string(),
            request_timeout: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

// Keeps the key out of logs and panic messages.
impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = CompletionSettings::new("key");
        assert_eq!(settings.model, DEFAULT_MISTRAL_MODEL);
        assert_eq!(settings.base_url, DEFAULT_MISTRAL_BASE_URL);
        assert!(settings.request_timeout.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = CompletionSettings::new("sk-very-secret");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_app_config_parses_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [completion]
            model = "mistral-large-latest"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.completion.model.as_deref(),
            Some("mistral-large-latest")
        );
        assert!(config.completion.base_url.is_none());
    }

    #[test]
    fn test_app_config_empty_document() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
