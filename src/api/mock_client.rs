use super::client::ModelTransport;
use crate::error::{GenerationError, GenerationResult};
use crate::types::{GenerateContentRequest, GenerateContentResponse};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One scripted reply from `MockModel`.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Response(GenerateContentResponse),
    TransportError(String),
}

/// In-process stand-in for the generation model. Replies are consumed in
/// order; every request is recorded for inspection.
#[derive(Clone, Default)]
pub struct MockModel {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
}

impl MockModel {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_texts(texts: Vec<String>) -> Self {
        Self::new(texts.into_iter().map(MockReply::Text).collect())
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_reply(&self, request: &GenerateContentRequest) -> GenerationResult<GenerateContentResponse> {
        lock(&self.requests).push(request.clone());
        match lock(&self.replies).pop_front() {
            Some(MockReply::Text(text)) => Ok(GenerateContentResponse::from_text(text)),
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::TransportError(message)) => Err(GenerationError::Transport(message)),
            None => Err(GenerationError::Transport(
                "MockModel: No more responses configured".to_string(),
            )),
        }
    }
}

impl ModelTransport for MockModel {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
    ) -> BoxFuture<'a, GenerationResult<GenerateContentResponse>> {
        let reply = self.next_reply(request);
        Box::pin(async move { reply })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
