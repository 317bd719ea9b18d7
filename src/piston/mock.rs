//! Mock executor for testing
//!
//! Returns scripted responses without making network calls.
//! Used by unit tests and by `--executor mock` for offline runs.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{ExecutionRequest, ExecutionResponse, Executor};
use crate::error::{PlaygroundError, Result};

/// Output returned when nothing else was scripted
pub const MOCK_OUTPUT: &str = "Mock output\n";

/// A scripted outcome
#[derive(Debug, Clone)]
enum Scripted {
    Respond(ExecutionResponse),
    /// Network failure carrying this message
    Fail(String),
}

/// Mock executor that returns predefined outcomes
pub struct MockExecutor {
    /// Queue of outcomes to return (FIFO)
    script: Arc<Mutex<VecDeque<Scripted>>>,
    /// Returned when the queue is empty
    default_response: ExecutionResponse,
    /// Every request received (for assertions)
    requests: Arc<Mutex<Vec<ExecutionRequest>>>,
    /// Artificial latency before answering
    delay: Option<Duration>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_response: ExecutionResponse::with_output(MOCK_OUTPUT),
            requests: Arc::new(Mutex::new(vec![])),
            delay: None,
        }
    }

    /// Set the response used when the queue is empty
    pub fn with_default(mut self, response: ExecutionResponse) -> Self {
        self.default_response = response;
        self
    }

    /// Answer every request after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: ExecutionResponse) {
        self.lock_script().push_back(Scripted::Respond(response));
    }

    /// Queue a network failure with `message`
    pub fn queue_failure(&self, message: impl Into<String>) {
        self.lock_script().push_back(Scripted::Fail(message.into()));
    }

    /// All requests made so far
    pub fn get_requests(&self) -> Vec<ExecutionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Last request made
    pub fn last_request(&self) -> Option<ExecutionRequest> {
        self.get_requests().pop()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Scripted>> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.lock_script().pop_front();
        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(PlaygroundError::Network(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}
