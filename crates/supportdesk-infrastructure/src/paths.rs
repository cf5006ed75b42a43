//! Path management for supportdesk configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/supportdesk/       # Config directory (or $SUPPORTDESK_CONFIG_DIR)
//! ├── config.toml              # Non-secret settings (model, endpoint)
//! └── secret.json              # API keys
//! ```

use std::path::{Path, PathBuf};

use supportdesk_core::config::{MistralConfig, SecretConfig};

/// Overrides the config directory when set.
pub const CONFIG_DIR_ENV: &str = "SUPPORTDESK_CONFIG_DIR";

const APP_DIR_NAME: &str = "supportdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config directory could be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves supportdesk's configuration paths.
///
/// Precedence for the base directory: explicit base path, then
/// `$SUPPORTDESK_CONFIG_DIR`, then the platform config dir
/// (`dirs::config_dir()/supportdesk`).
#[derive(Debug, Clone)]
pub struct SupportdeskPaths {
    base: Option<PathBuf>,
}

impl SupportdeskPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to `secret.json`.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Ensures `secret.json` exists, writing an empty template if it doesn't.
    ///
    /// The template leaves `model_name` unset so `$MISTRAL_MODEL_NAME` and
    /// `config.toml` keep applying. It is created with mode 600 on Unix.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            mistral: Some(MistralConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

impl Default for SupportdeskPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
