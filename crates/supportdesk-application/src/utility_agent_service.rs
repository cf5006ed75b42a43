//! Utility Agent Service
//!
//! One-shot LLM tools that share the completion client with the chat flow but
//! none of its state: structured extraction, email reply drafting and
//! summarization. Unlike the chat flow, failures here are returned to the
//! caller.

use std::sync::Arc;

use minijinja::context;
use serde::Serialize;

use supportdesk_core::completion::{ChatCompletionService, ResponseFormat};
use supportdesk_core::error::Result;
use supportdesk_core::prompt;

/// Facts the email drafter may rely on.
pub const EMAIL_FACTS: &str = "30-year fixed-rate: interest rate 6.403%, APR 6.484%
15-year fixed-rate: interest rate 5.705%, APR 5.848%";

pub const SAMPLE_MEDICAL_NOTES: &str =
    "60 year old male smoker diagnosed with diabetes weight 210 lbs";
pub const SAMPLE_EMAIL: &str = "What is your 30-year APR and how is it compared to 15-year?";
pub const SAMPLE_NEWSLETTER: &str = "Mistral partnered with Microsoft...";

const EXTRACT_TEMPLATE: &str = r#"Extract age, gender, diagnosis, weight, smoking as JSON from:
{{ notes }}"#;

const EMAIL_TEMPLATE: &str = r#"You are a mortgage lender support bot.
Reply politely using only the facts below.
Sign as Lender Customer Support.

Facts:
{{ facts }}

Email:
{{ email }}"#;

const SUMMARIZE_TEMPLATE: &str = r#"Summarize in 5-8 bullet points:

{{ text }}"#;

/// Removes Markdown code fences a model may wrap JSON in.
pub fn clean_json(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Result of a structured extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// Reply exactly as returned by the model.
    pub raw: String,
    /// Parsed JSON, or `None` if the reply was not valid JSON after fence
    /// stripping.
    pub parsed: Option<serde_json::Value>,
}

/// Service providing lightweight LLM utilities.
pub struct UtilityAgentService {
    service: Arc<dyn ChatCompletionService>,
}

impl UtilityAgentService {
    pub fn new(service: Arc<dyn ChatCompletionService>) -> Self {
        Self { service }
    }

    /// Extracts patient attributes from free-text notes using JSON mode.
    pub async fn extract_structured(&self, notes: &str) -> Result<ExtractionOutcome> {
        let prompt = prompt::render(EXTRACT_TEMPLATE, context! { notes => notes })?;
        let raw = self
            .service
            .complete(&prompt, ResponseFormat::JsonObject)
            .await?;

        let parsed = match serde_json::from_str(&clean_json(&raw)) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(error = %err, "extraction reply is not valid JSON");
                None
            }
        };

        Ok(ExtractionOutcome { raw, parsed })
    }

    /// Drafts a reply to a customer email using only [`EMAIL_FACTS`].
    pub async fn draft_email_reply(&self, email: &str) -> Result<String> {
        let prompt = prompt::render(
            EMAIL_TEMPLATE,
            context! { facts => EMAIL_FACTS, email => email },
        )?;
        Ok(self.service.complete(&prompt, ResponseFormat::Text).await?)
    }

    /// Summarizes text as 5-8 bullet points.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = prompt::render(SUMMARIZE_TEMPLATE, context! { text => text })?;
        Ok(self.service.complete(&prompt, ResponseFormat::Text).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportdesk_core::test_support::ScriptedCompletionService;

    #[test]
    fn test_clean_json_strips_fences() {
        assert_eq!(clean_json("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(clean_json("```\n[1, 2]\n```  "), "[1, 2]");
        assert_eq!(clean_json(" {\"plain\": true} "), "{\"plain\": true}");
    }

    #[tokio::test]
    async fn test_extract_uses_json_mode_and_parses() {
        let service = Arc::new(ScriptedCompletionService::replies([
            "```json\n{\"age\": 60, \"gender\": \"male\", \"smoking\": true}\n```",
        ]));
        let tools = UtilityAgentService::new(service.clone());

        let outcome = tools.extract_structured(SAMPLE_MEDICAL_NOTES).await.unwrap();

        assert_eq!(service.formats(), vec![ResponseFormat::JsonObject]);
        assert!(service.prompts()[0].ends_with(SAMPLE_MEDICAL_NOTES));
        let parsed = outcome.parsed.unwrap();
        assert_eq!(parsed["age"], 60);
        assert_eq!(parsed["smoking"], true);
        assert!(outcome.raw.starts_with("```json"));
    }

    #[tokio::test]
    async fn test_extract_keeps_raw_when_not_json() {
        let service = Arc::new(ScriptedCompletionService::replies(["age: sixty"]));
        let tools = UtilityAgentService::new(service);

        let outcome = tools.extract_structured("notes").await.unwrap();
        assert!(outcome.parsed.is_none());
        assert_eq!(outcome.raw, "age: sixty");
    }

    #[tokio::test]
    async fn test_email_prompt_contains_facts_and_signature() {
        let service = Arc::new(ScriptedCompletionService::replies(["Dear customer, ..."]));
        let tools = UtilityAgentService::new(service.clone());

        let reply = tools.draft_email_reply(SAMPLE_EMAIL).await.unwrap();
        assert_eq!(reply, "Dear customer, ...");

        let prompt = &service.prompts()[0];
        assert!(prompt.contains("APR 6.484%"));
        assert!(prompt.contains("APR 5.848%"));
        assert!(prompt.contains("Sign as Lender Customer Support."));
        assert!(prompt.ends_with(SAMPLE_EMAIL));
    }

    #[tokio::test]
    async fn test_summarize_prompt() {
        let service = Arc::new(ScriptedCompletionService::replies(["- point"]));
        let tools = UtilityAgentService::new(service.clone());

        tools.summarize(SAMPLE_NEWSLETTER).await.unwrap();
        assert_eq!(
            service.prompts()[0],
            format!("Summarize in 5-8 bullet points:\n\n{SAMPLE_NEWSLETTER}")
        );
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let service = Arc::new(ScriptedCompletionService::failing(3));
        let tools = UtilityAgentService::new(service);

        assert!(tools.summarize("text").await.unwrap_err().is_completion());
        assert!(tools.draft_email_reply("email").await.is_err());
        assert!(tools.extract_structured("notes").await.is_err());
    }
}
