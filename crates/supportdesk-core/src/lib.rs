//! Domain core of Supportdesk.
//!
//! Free-text inquiry → [`IntentClassifier`] → [`Category`] →
//! [`guidance::lookup`] → [`ResponseComposer`] → answer. Everything that
//! talks to a model goes through [`ChatCompletionService`].

pub mod completion;
pub mod composer;
pub mod config;
pub mod error;
pub mod guidance;
pub mod intent;
pub mod prompt;
pub mod secret;
pub mod transcript;

#[cfg(any(test, feature = "test-util"))]
pub mod test_support;

pub use completion::{ChatCompletionService, CompletionError, ResponseFormat};
pub use composer::{Composition, ResponseComposer};
pub use error::SupportdeskError;
pub use intent::{Category, Classification, ClassificationSource, IntentClassifier};
pub use transcript::{Transcript, Turn, TurnRole};
