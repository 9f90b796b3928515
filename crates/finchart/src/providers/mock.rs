use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::providers::base::{Provider, ProviderError};
use crate::providers::request::MessagesRequest;
use crate::providers::response::MessagesResponse;

/// A mock provider that returns pre-configured responses and records what it was sent
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<MessagesResponse, u16>>>>,
    requests: Arc<Mutex<Vec<MessagesRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses; `Err(status)` fails the call
    pub fn new(responses: Vec<Result<MessagesResponse, u16>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<MessagesRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: &MessagesRequest) -> Result<MessagesResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            return Ok(MessagesResponse::new(vec![]));
        }
        responses.remove(0).map_err(|status| ProviderError::Status {
            status,
            message: "mock failure".to_string(),
        })
    }
}
