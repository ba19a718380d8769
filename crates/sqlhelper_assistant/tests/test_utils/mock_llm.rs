//! Scripted LLM driver.

use async_trait::async_trait;
use sqlhelper_core::{GenerateRequest, GenerateResponse, Output};
use sqlhelper_error::{LlmError, LlmErrorKind, SqlHelperError};
use sqlhelper_interface::LlmDriver;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with queued texts in order and records every request.
///
/// Once the queue is empty every call fails with an HTTP error.
pub struct ScriptedDriver {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    /// Queue the given replies.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of generate calls so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Text of the last (query) message of the n-th request.
    pub fn query_text(&self, n: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[n].messages[2].content.clone()
    }
}

#[async_trait]
impl LlmDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, SqlHelperError> {
        self.requests.lock().unwrap().push(req.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            None => Err(LlmError::new(LlmErrorKind::Http("connection refused".into())).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}
