//! Completion clients for hosted LLM providers.

pub mod mistral_api_agent;
pub mod supported_models;

pub use mistral_api_agent::MistralApiAgent;
