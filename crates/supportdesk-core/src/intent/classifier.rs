//! Intent classification: a cheap heuristic in front of one model call.

use std::sync::Arc;

use minijinja::context;

use super::category::Category;
use super::matcher::CategoryMatcher;
use super::normalize::{normalize, token_count};
use crate::completion::{ChatCompletionService, ResponseFormat};
use crate::error::Result;
use crate::prompt::{self, CLASSIFY_TEMPLATE};

/// Inquiries that exactly match one of these (after normalization) never
/// reach the model.
pub const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "yo",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Inquiries with at most this many tokens never reach the model.
pub const TRIVIAL_TOKEN_LIMIT: usize = 2;

/// How a category was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// Short-circuited by the trivial-input heuristic.
    Heuristic,
    /// Parsed from the model reply.
    Model,
    /// The model call failed; the fallback was used.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub source: ClassificationSource,
}

/// Routes an inquiry to a [`Category`].
///
/// Never fails: any completion error degrades to the matcher's fallback.
pub struct IntentClassifier {
    service: Arc<dyn ChatCompletionService>,
    matcher: CategoryMatcher,
}

impl IntentClassifier {
    pub fn new(service: Arc<dyn ChatCompletionService>) -> Self {
        Self::with_matcher(service, CategoryMatcher::default())
    }

    pub fn with_matcher(service: Arc<dyn ChatCompletionService>, matcher: CategoryMatcher) -> Self {
        Self { service, matcher }
    }

    /// True for inputs that are too short or merely a greeting.
    pub fn is_trivial(normalized: &str) -> bool {
        token_count(normalized) <= TRIVIAL_TOKEN_LIMIT || GREETINGS.contains(&normalized)
    }

    pub async fn classify(&self, inquiry: &str) -> Category {
        self.classify_detailed(inquiry).await.category
    }

    pub async fn classify_detailed(&self, inquiry: &str) -> Classification {
        let fallback = self.matcher.fallback();
        let normalized = normalize(inquiry);

        if Self::is_trivial(&normalized) {
            tracing::debug!(tokens = token_count(&normalized), "trivial inquiry, skipping model");
            return Classification {
                category: fallback,
                source: ClassificationSource::Heuristic,
            };
        }

        let prompt = match self.classification_prompt(inquiry) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::warn!(error = %err, "failed to render classification prompt");
                return Classification {
                    category: fallback,
                    source: ClassificationSource::Fallback,
                };
            }
        };

        match self.service.complete(&prompt, ResponseFormat::Text).await {
            Ok(raw) => {
                let category = self.matcher.match_response(&raw);
                tracing::debug!(%category, model = self.service.model(), "classified inquiry");
                Classification {
                    category,
                    source: ClassificationSource::Model,
                }
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    retryable = err.is_retryable(),
                    "classification call failed, using fallback category"
                );
                Classification {
                    category: fallback,
                    source: ClassificationSource::Fallback,
                }
            }
        }
    }

    /// Renders the classification prompt; the raw (un-normalized) inquiry is
    /// embedded.
    pub fn classification_prompt(&self, inquiry: &str) -> Result<String> {
        let categories: Vec<&str> = self.matcher.allowed().iter().map(|c| c.label()).collect();
        prompt::render(
            CLASSIFY_TEMPLATE,
            context! { categories => categories, inquiry => inquiry },
        )
    }
}
