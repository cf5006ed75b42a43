//! `secret.json` storage.
//!
//! The file is optional. A missing or blank file reads as `None` so the
//! caller can fall back to `$MISTRAL_API_KEY`. Errors never carry file
//! content.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use supportdesk_core::config::SecretConfig;

use crate::paths::{PathError, SupportdeskPaths};

#[derive(Debug)]
pub enum SecretStorageError {
    /// The config directory could not be resolved.
    Path(PathError),
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// The file is not valid `secret.json`.
    Parse(serde_json::Error),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::Path(e) => write!(f, "{e}"),
            SecretStorageError::Io(e) => write!(f, "Cannot read secret file: {e}"),
            // Position only; the serde message could quote a fragment of the key.
            SecretStorageError::Parse(e) => write!(
                f,
                "Secret file is not valid JSON (line {}, column {})",
                e.line(),
                e.column()
            ),
        }
    }
}

impl std::error::Error for SecretStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SecretStorageError::Path(e) => Some(e),
            SecretStorageError::Io(e) => Some(e),
            SecretStorageError::Parse(_) => None,
        }
    }
}

impl From<PathError> for SecretStorageError {
    fn from(e: PathError) -> Self {
        SecretStorageError::Path(e)
    }
}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::Io(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::Parse(e)
    }
}

/// Read access to `secret.json`.
#[derive(Debug, Clone)]
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new(paths: &SupportdeskPaths) -> Result<Self, SecretStorageError> {
        Ok(Self {
            path: paths.secret_file()?,
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the file, or `None` when it is absent or blank.
    pub fn load(&self) -> Result<Option<SecretConfig>, SecretStorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
