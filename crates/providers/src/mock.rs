//! Scripted mock provider — offline replies for tests and dry runs.
//!
//! Returns canned responses in sequence and records every request it
//! receives, so tests can assert on exactly what the pipeline sent (or
//! that nothing was sent at all).

use async_trait::async_trait;
use promptree_core::error::ProviderError;
use promptree_core::message::Message;
use promptree_core::provider::{Provider, ProviderRequest, ProviderResponse};
use std::collections::VecDeque;
use std::sync::Mutex;

const DEFAULT_REPLY: &str = "This is a mock response.";

/// A provider that replays scripted replies.
pub struct MockProvider {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    /// A mock that always answers with a fixed canned reply.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock that answers with the given replies in order, then falls
    /// back to the canned reply.
    pub fn with_replies(replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// How many completion calls were made.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The requests received so far, in order.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| DEFAULT_REPLY.to_string());

        Ok(ProviderResponse {
            message: Message::assistant(reply),
            usage: None,
            model,
        })
    }

    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(vec!["mock-model".into()])
    }
}
