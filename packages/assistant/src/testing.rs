//! Testing utilities including mock implementations.
//!
//! Useful for exercising the assistant without making real AI calls.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::enhance::Enhancer;
use crate::error::EnhancerError;

/// A scripted [`Enhancer`] for tests.
///
/// Returns canned responses in order (repeating the last one), can be
/// told to fail every call or to stall long enough to trip the time
/// box, and records every prompt for assertions.
#[derive(Default)]
pub struct MockEnhancer {
    responses: RwLock<Vec<String>>,
    cursor: Mutex<usize>,
    fail: bool,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockEnhancer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.write().unwrap().push(response.into());
        self
    }

    /// Every call returns a provider error.
    pub fn always_fail(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Sleep before answering, to exercise the timeout fallback.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Enhancer for MockEnhancer {
    async fn complete(&self, prompt: &str) -> Result<String, EnhancerError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(EnhancerError::Provider("mock failure".to_string()));
        }

        let responses = self.responses.read().unwrap();
        if responses.is_empty() {
            return Err(EnhancerError::Empty);
        }

        let mut cursor = self.cursor.lock().unwrap();
        let index = (*cursor).min(responses.len() - 1);
        *cursor += 1;
        Ok(responses[index].clone())
    }
}
