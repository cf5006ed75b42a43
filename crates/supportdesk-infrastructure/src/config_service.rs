//! Startup configuration resolution.
//!
//! Combines `secret.json`, environment variables and `config.toml` into the
//! single [`CompletionSettings`] handed to the completion client. Missing
//! credentials are a hard error: the process must not start without them.

use std::sync::Arc;
use std::time::Duration;

use supportdesk_core::SupportdeskError;
use supportdesk_core::config::{
    AppConfig, CompletionSettings, DEFAULT_MISTRAL_BASE_URL, DEFAULT_MISTRAL_MODEL, SecretConfig,
};
use supportdesk_core::error::Result;
use supportdesk_core::secret::SecretService;

use crate::paths::SupportdeskPaths;
use crate::secret_service::SecretServiceImpl;
use crate::storage::ConfigStorage;

pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";
pub const MODEL_ENV: &str = "MISTRAL_MODEL_NAME";

/// Resolves settings from the config directory and the process environment.
pub struct ConfigService {
    secret_service: Arc<dyn SecretService>,
    config_storage: ConfigStorage,
    paths: SupportdeskPaths,
}

impl ConfigService {
    pub fn new(paths: SupportdeskPaths) -> Result<Self> {
        let secret_service =
            SecretServiceImpl::new(&paths).map_err(|e| SupportdeskError::config(e.to_string()))?;
        let config_file = paths
            .config_file()
            .map_err(|e| SupportdeskError::config(e.to_string()))?;

        Ok(Self {
            secret_service: Arc::new(secret_service),
            config_storage: ConfigStorage::new(config_file),
            paths,
        })
    }

    pub fn paths(&self) -> &SupportdeskPaths {
        &self.paths
    }

    pub fn load_app_config(&self) -> Result<AppConfig> {
        self.config_storage.load().map_err(|e| {
            SupportdeskError::config(format!(
                "Failed to read {}: {}",
                self.config_storage.path().display(),
                e
            ))
        })
    }

    pub async fn resolve_completion_settings(&self) -> Result<CompletionSettings> {
        let secrets = self
            .secret_service
            .load_secrets()
            .await
            .map_err(SupportdeskError::config)?;
        let app_config = self.load_app_config()?;

        let settings = resolve_settings(&secrets, &app_config, |key| std::env::var(key).ok())
            .map_err(|err| match err {
                SupportdeskError::Config(message) => {
                    let hint = self
                        .paths
                        .secret_file()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "secret.json".to_string());
                    SupportdeskError::config(format!(
                        "{message} (looked in {hint} and ${API_KEY_ENV})"
                    ))
                }
                other => other,
            })?;

        tracing::info!(
            model = %settings.model,
            base_url = %settings.base_url,
            "resolved completion settings"
        );
        Ok(settings)
    }
}

/// Pure resolution rules.
///
/// - API key: `secret.json`, else `$MISTRAL_API_KEY`; trimmed, blank counts
///   as missing.
/// - Model: `secret.json` `model_name`, else `$MISTRAL_MODEL_NAME`, else
///   `config.toml`, else the default model.
/// - Base URL and timeout: `config.toml`, else defaults.
pub fn resolve_settings<F>(
    secrets: &SecretConfig,
    app_config: &AppConfig,
    env: F,
) -> Result<CompletionSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mistral = secrets.mistral.as_ref();

    let api_key = non_blank(mistral.map(|m| m.api_key.clone()))
        .or_else(|| non_blank(env(API_KEY_ENV)))
        .ok_or_else(|| SupportdeskError::config("Missing Mistral API key"))?;

    let model = non_blank(mistral.and_then(|m| m.model_name.clone()))
        .or_else(|| non_blank(env(MODEL_ENV)))
        .or_else(|| non_blank(app_config.completion.model.clone()))
        .unwrap_or_else(|| DEFAULT_MISTRAL_MODEL.to_string());

    let base_url = non_blank(app_config.completion.base_url.clone())
        .unwrap_or_else(|| DEFAULT_MISTRAL_BASE_URL.to_string());

    let mut settings = CompletionSettings::new(api_key)
        .with_model(model)
        .with_base_url(base_url);
    if let Some(secs) = app_config.completion.request_timeout_secs.filter(|s| *s > 0) {
        settings = settings.with_request_timeout(Duration::from_secs(secs));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use supportdesk_core::config::{CompletionOptions, MistralConfig};
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn secrets(api_key: &str, model: Option<&str>) -> SecretConfig {
        SecretConfig {
            mistral: Some(MistralConfig {
                api_key: api_key.to_string(),
                model_name: model.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let result = resolve_settings(&SecretConfig::default(), &AppConfig::default(), env_of(&[]));
        assert!(result.unwrap_err().is_config());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let result = resolve_settings(
            &secrets("   ", None),
            &AppConfig::default(),
            env_of(&[(API_KEY_ENV, "\n")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_secret_file_key_wins_over_env() {
        let settings = resolve_settings(
            &secrets(" file-key ", None),
            &AppConfig::default(),
            env_of(&[(API_KEY_ENV, "env-key")]),
        )
        .unwrap();
        assert_eq!(settings.api_key, "file-key");
        assert_eq!(settings.model, DEFAULT_MISTRAL_MODEL);
        assert_eq!(settings.base_url, DEFAULT_MISTRAL_BASE_URL);
    }

    #[test]
    fn test_env_fallback_and_model_precedence() {
        let app_config = AppConfig {
            completion: CompletionOptions {
                model: Some("from-config".into()),
                base_url: Some("http://localhost:9000/v1".into()),
                request_timeout_secs: Some(15),
            },
        };

        let settings = resolve_settings(
            &SecretConfig::default(),
            &app_config,
            env_of(&[(API_KEY_ENV, "env-key"), (MODEL_ENV, "from-env")]),
        )
        .unwrap();
        assert_eq!(settings.api_key, "env-key");
        assert_eq!(settings.model, "from-env");
        assert_eq!(settings.base_url, "http://localhost:9000/v1");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(15)));

        let settings = resolve_settings(
            &SecretConfig::default(),
            &app_config,
            env_of(&[(API_KEY_ENV, "env-key")]),
        )
        .unwrap();
        assert_eq!(settings.model, "from-config");

        let settings = resolve_settings(
            &secrets("k", Some("from-secret")),
            &app_config,
            env_of(&[(MODEL_ENV, "from-env")]),
        )
        .unwrap();
        assert_eq!(settings.model, "from-secret");
    }

    #[test]
    fn test_service_reads_process_environment() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(SupportdeskPaths::new(Some(temp_dir.path()))).unwrap();

        temp_env::with_vars(
            [(API_KEY_ENV, Some("process-key")), (MODEL_ENV, None::<&str>)],
            || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                let settings = runtime
                    .block_on(service.resolve_completion_settings())
                    .unwrap();
                assert_eq!(settings.api_key, "process-key");
                assert_eq!(settings.model, DEFAULT_MISTRAL_MODEL);
            },
        );
    }

    #[test]
    fn test_service_refuses_without_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(SupportdeskPaths::new(Some(temp_dir.path()))).unwrap();

        temp_env::with_var_unset(API_KEY_ENV, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let err = runtime
                .block_on(service.resolve_completion_settings())
                .unwrap_err();
            assert!(err.is_config());
            assert!(err.to_string().contains(API_KEY_ENV));
        });
    }

    #[test]
    fn test_secret_template_keeps_env_and_config_models() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SupportdeskPaths::new(Some(temp_dir.path()));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        // First start without a key writes the template.
        let first_start = ConfigService::new(paths.clone()).unwrap();
        temp_env::with_var_unset(API_KEY_ENV, || {
            assert!(
                runtime
                    .block_on(first_start.resolve_completion_settings())
                    .is_err()
            );
        });
        paths.ensure_secret_file().unwrap();
        std::fs::write(
            paths.config_file().unwrap(),
            "[completion]\nmodel = \"mistral-large-latest\"\n",
        )
        .unwrap();

        let next_start = ConfigService::new(paths).unwrap();
        temp_env::with_vars(
            [(API_KEY_ENV, Some("k")), (MODEL_ENV, Some("open-mistral-nemo"))],
            || {
                let settings = runtime
                    .block_on(next_start.resolve_completion_settings())
                    .unwrap();
                assert_eq!(settings.api_key, "k");
                assert_eq!(settings.model, "open-mistral-nemo");
            },
        );
        temp_env::with_vars(
            [(API_KEY_ENV, Some("k")), (MODEL_ENV, None)],
            || {
                let settings = runtime
                    .block_on(next_start.resolve_completion_settings())
                    .unwrap();
                assert_eq!(settings.model, "mistral-large-latest");
            },
        );
    }
}
