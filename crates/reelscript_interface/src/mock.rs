//! Scripted driver for tests.

use crate::ReelscriptDriver;
use async_trait::async_trait;
use parking_lot::Mutex;
use reelscript_core::{GenerateRequest, GenerateResponse};
use reelscript_error::{GeminiError, GeminiErrorKind, ReelscriptError, ReelscriptResult};
use std::collections::VecDeque;
use tokio::sync::{Notify, oneshot};

/// A single scripted response.
#[derive(Debug)]
pub enum MockResponse {
    /// Return this text
    Success(String),
    /// Fail with this error
    Error(GeminiErrorKind),
    /// Wait for the sender to fire (or drop), then answer with `then`
    Gated {
        /// Released by the test
        release: oneshot::Receiver<()>,
        /// Response once released
        then: Box<MockResponse>,
    },
}

impl MockResponse {
    /// A response held back until the returned sender fires.
    pub fn gated(then: MockResponse) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let response = MockResponse::Gated {
            release: rx,
            then: Box::new(then),
        };
        (response, tx)
    }
}

/// JSON text of a `{"scripts": [...]}` payload.
pub fn scripts_payload<S: AsRef<str>>(scripts: &[S]) -> String {
    let scripts: Vec<&str> = scripts.iter().map(AsRef::as_ref).collect();
    serde_json::json!({ "scripts": scripts }).to_string()
}

#[derive(Debug, Clone)]
enum Fallback {
    Success(String),
    Error(GeminiErrorKind),
    Exhausted,
}

/// Driver that answers from a script instead of the network.
///
/// Scripted responses are consumed in call order. Once they run out the
/// fallback answers, which by default is an error.
#[derive(Debug)]
pub struct MockDriver {
    queue: Mutex<VecDeque<MockResponse>>,
    fallback: Fallback,
    requests: Mutex<Vec<GenerateRequest>>,
    calls: Notify,
    model_name: String,
}

impl MockDriver {
    fn with(queue: Vec<MockResponse>, fallback: Fallback) -> Self {
        Self {
            queue: Mutex::new(queue.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
            calls: Notify::new(),
            model_name: "mock-model".to_string(),
        }
    }

    /// Always succeed with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::with(Vec::new(), Fallback::Success(text.into()))
    }

    /// Always fail with the given error.
    pub fn new_error(error: GeminiErrorKind) -> Self {
        Self::with(Vec::new(), Fallback::Error(error))
    }

    /// Answer with each response in turn, then fail.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::with(responses, Fallback::Exhausted)
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Every request received, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().clone()
    }

    /// Wait until at least `n` calls have started.
    pub async fn wait_for_calls(&self, n: usize) {
        loop {
            let notified = self.calls.notified();
            if self.call_count() >= n {
                return;
            }
            notified.await;
        }
    }

    fn fallback_response(&self, call: usize) -> ReelscriptResult<GenerateResponse> {
        match &self.fallback {
            Fallback::Success(text) => Ok(GenerateResponse::from_text(text.clone())),
            Fallback::Error(kind) => Err(GeminiError::new(kind.clone()).into()),
            Fallback::Exhausted => Err(GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Mock sequence exhausted (call {})",
                call
            )))
            .into()),
        }
    }
}

async fn resolve(mut response: MockResponse) -> ReelscriptResult<GenerateResponse> {
    loop {
        match response {
            MockResponse::Success(text) => return Ok(GenerateResponse::from_text(text)),
            MockResponse::Error(kind) => {
                return Err(ReelscriptError::from(GeminiError::new(kind)));
            }
            MockResponse::Gated { release, then } => {
                // A dropped sender releases the gate too
                let _ = release.await;
                response = *then;
            }
        }
    }
}

#[async_trait]
impl ReelscriptDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse> {
        let (call, next) = {
            let mut requests = self.requests.lock();
            requests.push(req.clone());
            (requests.len(), self.queue.lock().pop_front())
        };
        self.calls.notify_waiters();
        tracing::trace!(call, "Mock driver called");

        match next {
            Some(response) => resolve(response).await,
            None => self.fallback_response(call),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequence_then_exhausted() {
        let driver = MockDriver::new_sequence(vec![
            MockResponse::Success("first".into()),
            MockResponse::Error(GeminiErrorKind::EmptyResponse),
        ]);
        let request = GenerateRequest::default();

        assert_eq!(driver.generate(&request).await.unwrap().text(), "first");
        assert!(driver.generate(&request).await.is_err());
        assert!(driver.generate(&request).await.is_err());
        assert_eq!(driver.call_count(), 3);
    }

    #[tokio::test]
    async fn test_gate_holds_response() {
        let (gated, release) = MockResponse::gated(MockResponse::Success("late".into()));
        let driver = std::sync::Arc::new(MockDriver::new_sequence(vec![gated]));

        let task = {
            let driver = driver.clone();
            tokio::spawn(async move { driver.generate(&GenerateRequest::default()).await })
        };
        driver.wait_for_calls(1).await;
        assert!(!task.is_finished());

        release.send(()).unwrap();
        assert_eq!(task.await.unwrap().unwrap().text(), "late");
    }

    #[test]
    fn test_scripts_payload() {
        let payload = scripts_payload(&["a", "b"]);
        assert_eq!(payload, r#"{"scripts":["a","b"]}"#);
    }
}
