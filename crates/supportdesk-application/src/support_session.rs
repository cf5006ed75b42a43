//! Support chat session: classify → compose → record.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use supportdesk_core::completion::ChatCompletionService;
use supportdesk_core::composer::ResponseComposer;
use supportdesk_core::intent::{Classification, IntentClassifier};
use supportdesk_core::transcript::{Transcript, Turn};

/// The pair of turns recorded by one successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: Turn,
    pub assistant: Turn,
    pub classification: Classification,
    /// True when the answer is the raw guidance because the model call failed.
    pub degraded: bool,
}

/// One user's conversation with the support assistant.
///
/// The session exclusively owns its transcript. Both turns of an exchange are
/// appended under a single write guard, so readers see either neither or both.
pub struct SupportSession {
    id: String,
    classifier: IntentClassifier,
    composer: ResponseComposer,
    transcript: RwLock<Transcript>,
}

impl SupportSession {
    pub fn new(service: Arc<dyn ChatCompletionService>) -> Self {
        Self::with_parts(
            IntentClassifier::new(service.clone()),
            ResponseComposer::new(service),
        )
    }

    pub fn with_parts(classifier: IntentClassifier, composer: ResponseComposer) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            classifier,
            composer,
            transcript: RwLock::new(Transcript::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Handles one inquiry.
    ///
    /// Blank input is ignored and returns `None` without touching the
    /// transcript or the model.
    pub async fn submit(&self, inquiry: &str) -> Option<Exchange> {
        let inquiry = inquiry.trim();
        let user = Turn::user(inquiry)?;

        let classification = self.classifier.classify_detailed(inquiry).await;
        let composition = self
            .composer
            .compose_detailed(classification.category, inquiry)
            .await;
        let assistant = Turn::assistant(composition.text, classification.category)?;

        self.transcript
            .write()
            .await
            .append_exchange(user.clone(), assistant.clone());

        tracing::info!(
            session_id = %self.id,
            category = %classification.category,
            source = ?classification.source,
            degraded = composition.degraded,
            "recorded exchange"
        );

        Some(Exchange {
            user,
            assistant,
            classification,
            degraded: composition.degraded,
        })
    }

    /// Drops every turn at once.
    pub async fn clear(&self) {
        let mut transcript = self.transcript.write().await;
        let dropped = transcript.len();
        transcript.clear();
        tracing::info!(session_id = %self.id, dropped, "cleared transcript");
    }

    /// Snapshot of the transcript in chronological order.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.transcript.read().await.turns().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.transcript.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transcript.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportdesk_core::guidance;
    use supportdesk_core::intent::{Category, ClassificationSource};
    use supportdesk_core::test_support::ScriptedCompletionService;
    use supportdesk_core::transcript::TurnRole;

    #[tokio::test]
    async fn test_blank_submit_is_a_no_op() {
        let service = Arc::new(ScriptedCompletionService::new(vec![]));
        let session = SupportSession::new(service.clone());

        assert_eq!(session.len().await, 0);
        assert!(session.submit("").await.is_none());
        assert!(session.submit("   \n\t").await.is_none());
        assert_eq!(session.len().await, 0);
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_country_support_scenario() {
        let service = Arc::new(ScriptedCompletionService::replies([
            "country support",
            "Yes, most countries are supported, including Germany.",
        ]));
        let session = SupportSession::new(service.clone());

        let exchange = session
            .submit("Does your card work in Germany?")
            .await
            .unwrap();

        assert_eq!(exchange.classification.category, Category::CountrySupport);
        assert_eq!(exchange.classification.source, ClassificationSource::Model);
        assert_eq!(
            exchange.assistant.text(),
            "Yes, most countries are supported, including Germany."
        );
        assert!(!exchange.degraded);
        assert_eq!(service.call_count(), 2);

        let answer_prompt = &service.prompts()[1];
        assert!(answer_prompt.contains(guidance::lookup(Category::CountrySupport)));
        assert!(!answer_prompt.contains(guidance::lookup(Category::CardArrival)));
    }

    #[tokio::test]
    async fn test_double_failure_scenario() {
        let service = Arc::new(ScriptedCompletionService::failing(2));
        let session = SupportSession::new(service.clone());

        let exchange = session
            .submit("I was charged twice by a merchant.")
            .await
            .unwrap();

        assert_eq!(exchange.classification.category, Category::CustomerService);
        assert_eq!(exchange.classification.source, ClassificationSource::Fallback);
        assert_eq!(
            exchange.assistant.text(),
            guidance::lookup(Category::CustomerService)
        );
        assert!(exchange.degraded);
        assert_eq!(service.call_count(), 2);
        assert_eq!(session.len().await, 2);
    }

    #[tokio::test]
    async fn test_greeting_uses_one_call() {
        let service = Arc::new(ScriptedCompletionService::replies(["Hello! How can I help?"]));
        let session = SupportSession::new(service.clone());

        let exchange = session.submit("  Hello ").await.unwrap();
        assert_eq!(exchange.classification.source, ClassificationSource::Heuristic);
        assert_eq!(exchange.user.text(), "Hello");
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_turns_are_appended_in_order() {
        let service = Arc::new(ScriptedCompletionService::replies([
            "change pin",
            "Go to Cards > Manage card > Change PIN.",
            "cancel transfer",
            "Cancel it in Transfers > Activity.",
        ]));
        let session = SupportSession::new(service);

        session.submit("I want to change my PIN.").await.unwrap();
        session
            .submit("I need to cancel a transfer I just made.")
            .await
            .unwrap();

        let turns = session.transcript().await;
        let roles: Vec<TurnRole> = turns.iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::User,
                TurnRole::Assistant,
                TurnRole::User,
                TurnRole::Assistant
            ]
        );
        assert_eq!(turns[0].category(), None);
        assert_eq!(turns[1].category(), Some(Category::ChangePin));
        assert_eq!(turns[3].category(), Some(Category::CancelTransfer));
    }

    #[tokio::test]
    async fn test_clear_resets_transcript() {
        let service = Arc::new(ScriptedCompletionService::replies(["Hi!", "Hello again!"]));
        let session = SupportSession::new(service);

        session.submit("hi").await.unwrap();
        session.submit("hey").await.unwrap();
        assert_eq!(session.len().await, 4);

        session.clear().await;
        assert!(session.is_empty().await);
        assert!(session.transcript().await.is_empty());
    }
}
