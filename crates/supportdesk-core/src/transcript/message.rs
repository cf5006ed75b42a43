//! Conversation turn types.

use serde::{Deserialize, Serialize};

use crate::intent::Category;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    User,
    Assistant,
}

/// One entry of the transcript.
///
/// Fields are private so a turn cannot change after it is created; the text
/// is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    /// Timestamp when the turn was created (ISO 8601 format).
    timestamp: String,
}

impl Turn {
    /// Creates a user turn. Returns `None` for blank text.
    pub fn user(text: impl Into<String>) -> Option<Self> {
        Self::build(TurnRole::User, text.into(), None)
    }

    /// Creates an assistant turn carrying its resolved category. Returns
    /// `None` for blank text.
    pub fn assistant(text: impl Into<String>, category: Category) -> Option<Self> {
        Self::build(TurnRole::Assistant, text.into(), Some(category))
    }

    fn build(role: TurnRole, text: String, category: Option<Category>) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            role,
            text,
            category,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
