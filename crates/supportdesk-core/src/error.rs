//! Error types for the Supportdesk application.

use crate::completion::CompletionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Supportdesk workspace.
///
/// The chat flow itself never surfaces these (every failure there degrades to
/// a fallback answer); they come from startup, storage and the utility tools.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SupportdeskError {
    /// Configuration error (missing credentials, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Chat completion call failed
    #[error("Completion error: {0}")]
    Completion(String),

    /// Prompt template rendering failed
    #[error("Template error: {0}")]
    Template(String),
}

impl SupportdeskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a completion error
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SupportdeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SupportdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SupportdeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for SupportdeskError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<CompletionError> for SupportdeskError {
    fn from(err: CompletionError) -> Self {
        Self::Completion(err.to_string())
    }
}

/// A type alias for `Result<T, SupportdeskError>`.
pub type Result<T> = std::result::Result<T, SupportdeskError>;
