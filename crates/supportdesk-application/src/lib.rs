//! Application layer: the support chat session and the one-shot utility
//! tools, both wired over a shared [`ChatCompletionService`].
//!
//! [`ChatCompletionService`]: supportdesk_core::ChatCompletionService

pub mod quick_examples;
pub mod support_session;
pub mod utility_agent_service;

pub use support_session::{Exchange, SupportSession};
pub use utility_agent_service::{ExtractionOutcome, UtilityAgentService};
