//! In-memory completion fake for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::completion::{ChatCompletionService, CompletionError, ResponseFormat};

/// Plays back a fixed script of replies and records every call.
///
/// Once the script is exhausted each further call fails with a transport
/// error.
pub struct ScriptedCompletionService {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<(String, ResponseFormat)>>,
}

impl ScriptedCompletionService {
    pub fn new(script: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Successful replies, in order.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// `count` consecutive service errors.
    pub fn failing(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|_| {
                    Err(CompletionError::Api {
                        status: 503,
                        message: "service unavailable".into(),
                        is_retryable: true,
                    })
                })
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    pub fn formats(&self) -> Vec<ResponseFormat> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, format)| *format)
            .collect()
    }
}

#[async_trait]
impl ChatCompletionService for ScriptedCompletionService {
    async fn complete(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), format));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CompletionError::Transport {
                    message: "script exhausted".into(),
                    is_retryable: false,
                })
            })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
