//! Trait definitions for generation backends.

use async_trait::async_trait;
use novelwriter_core::{GenerateRequest, GenerateResponse};
use novelwriter_error::NovelwriterResult;
use novelwriter_rate_limit::ApiKey;

/// Core trait that every generation backend implements.
///
/// The credential is passed per call so a rotation layer above the driver can
/// choose it.
#[async_trait]
pub trait NovelwriterDriver: Send + Sync {
    /// Generate model output for a chat request.
    async fn generate(
        &self,
        key: &ApiKey,
        req: &GenerateRequest,
    ) -> NovelwriterResult<GenerateResponse>;

    /// Provider name (e.g., "openrouter").
    fn provider_name(&self) -> &'static str;

    /// Base URL requests are sent to.
    fn endpoint(&self) -> &str;
}

/// Prompt in, cleaned text out.
///
/// This is the only surface stage collaborators see. Credential choice, model
/// choice and retries all live behind it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single-turn prompt and return the reply text.
    async fn complete(&self, prompt: &str) -> NovelwriterResult<String>;
}
