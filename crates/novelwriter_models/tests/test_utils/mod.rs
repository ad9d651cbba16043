//! Test utilities for provider tests.

use async_trait::async_trait;
use novelwriter_core::{GenerateRequest, GenerateResponse, Output};
use novelwriter_error::{NovelwriterResult, ProviderError, ProviderErrorKind};
use novelwriter_interface::NovelwriterDriver;
use novelwriter_rate_limit::{ApiKey, ProviderSettings};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted outcome for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with a provider error of this kind
    Fail(ProviderErrorKind),
}

/// A call the mock received.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Credential used
    pub key: String,
    /// Model requested
    pub model: Option<String>,
}

/// Driver that replays scripted replies and records calls.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockDriver {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NovelwriterDriver for MockDriver {
    async fn generate(
        &self,
        key: &ApiKey,
        req: &GenerateRequest,
    ) -> NovelwriterResult<GenerateResponse> {
        self.calls.lock().unwrap().push(MockCall {
            key: key.expose().to_string(),
            model: req.model.clone(),
        });
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockReply::Text(String::new()));
        match reply {
            MockReply::Text(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            MockReply::Fail(kind) => Err(ProviderError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn endpoint(&self) -> &str {
        "mock://"
    }
}

pub fn settings() -> ProviderSettings {
    ProviderSettings {
        base_url: "http://localhost".to_string(),
        primary_model: "free-model".to_string(),
        secondary_model: "paid-model".to_string(),
        temperature: 0.7,
        max_tokens: 2000,
        max_attempts: 3,
        primary_key_env: "UNUSED_FREE".to_string(),
        secondary_key_env: "UNUSED_PAID".to_string(),
        timeout_secs: 5,
    }
}
