//! Guidance-constrained answer generation.

use std::sync::Arc;

use minijinja::context;

use crate::completion::{ChatCompletionService, ResponseFormat};
use crate::error::Result;
use crate::guidance;
use crate::intent::Category;
use crate::prompt::{self, ANSWER_TEMPLATE};

/// Result of composing an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub text: String,
    /// True when the model could not be used and the raw guidance was returned.
    pub degraded: bool,
}

/// Phrases an answer restricted to one category's guidance.
///
/// Always produces text: on any failure the guidance itself is the answer.
pub struct ResponseComposer {
    service: Arc<dyn ChatCompletionService>,
}

impl ResponseComposer {
    pub fn new(service: Arc<dyn ChatCompletionService>) -> Self {
        Self { service }
    }

    pub async fn compose(&self, category: Category, inquiry: &str) -> String {
        self.compose_detailed(category, inquiry).await.text
    }

    pub async fn compose_detailed(&self, category: Category, inquiry: &str) -> Composition {
        let guidance = guidance::lookup(category);
        let degraded = || Composition {
            text: guidance.to_string(),
            degraded: true,
        };

        let prompt = match Self::answer_prompt(guidance, inquiry) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::warn!(error = %err, "failed to render answer prompt");
                return degraded();
            }
        };

        match self.service.complete(&prompt, ResponseFormat::Text).await {
            Ok(reply) => {
                let text = reply.trim();
                if text.is_empty() {
                    tracing::warn!(%category, "model returned an empty answer, using guidance");
                    return degraded();
                }
                Composition {
                    text: text.to_string(),
                    degraded: false,
                }
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    %category,
                    "answer call failed, returning guidance verbatim"
                );
                degraded()
            }
        }
    }

    pub fn answer_prompt(guidance: &str, inquiry: &str) -> Result<String> {
        prompt::render(
            ANSWER_TEMPLATE,
            context! { guidance => guidance, inquiry => inquiry },
        )
    }
}
