//! Secret service implementation backed by `secret.json`.

use std::sync::{Arc, RwLock};

use supportdesk_core::config::SecretConfig;
use supportdesk_core::secret::SecretService;

use crate::paths::SupportdeskPaths;
use crate::storage::{SecretStorage, SecretStorageError};

/// Loads `secret.json` once and caches it.
///
/// A missing file is not an error: it yields an empty [`SecretConfig`], so
/// callers can fall back to environment variables.
#[derive(Clone)]
pub struct SecretServiceImpl {
    secrets: Arc<RwLock<Option<SecretConfig>>>,
    storage: SecretStorage,
}

impl SecretServiceImpl {
    pub fn new(paths: &SupportdeskPaths) -> Result<Self, SecretStorageError> {
        Ok(Self::with_storage(SecretStorage::new(paths)?))
    }

    pub fn with_storage(storage: SecretStorage) -> Self {
        Self {
            secrets: Arc::new(RwLock::new(None)),
            storage,
        }
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig, String> {
        if let Ok(cached) = self.secrets.read() {
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = match self.storage.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::debug!(
                    path = %self.storage.path().display(),
                    "no secret file, using empty secrets"
                );
                SecretConfig::default()
            }
            Err(err) => return Err(format!("Failed to load secret file: {err}")),
        };

        if let Ok(mut cache) = self.secrets.write() {
            *cache = Some(loaded.clone());
        }

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_secrets_internal()
    }
}
