//! OpenRouter chat-completions client.

use super::conversion;
use super::dto::ChatResponse;
use async_trait::async_trait;
use novelwriter_core::{GenerateRequest, GenerateResponse};
use novelwriter_error::{
    HttpError, NovelwriterResult, ProviderError, ProviderErrorKind,
};
use novelwriter_interface::NovelwriterDriver;
use novelwriter_rate_limit::{ApiKey, ProviderSettings};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const APP_TITLE: &str = "novelwriter";

/// Client for any OpenAI-compatible chat-completions endpoint, OpenRouter by
/// default.
///
/// The client holds no credential; each call receives one.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    default_model: String,
}

impl OpenRouterClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %settings.base_url))]
    pub fn new(settings: &ProviderSettings) -> NovelwriterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            default_model: settings.primary_model.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Map a failed status to an error kind. Throttling statuses (429, 503) are
/// rate limits whatever the body says.
fn status_error(status: u16, message: String) -> ProviderErrorKind {
    if ProviderErrorKind::is_throttled_status(status) {
        ProviderErrorKind::RateLimit(format!("HTTP {}: {}", status, message))
    } else {
        ProviderErrorKind::Api { status, message }
    }
}

#[async_trait]
impl NovelwriterDriver for OpenRouterClient {
    #[instrument(skip(self, key, req), fields(provider = "openrouter", key = %key, model = ?req.model))]
    async fn generate(
        &self,
        key: &ApiKey,
        req: &GenerateRequest,
    ) -> NovelwriterResult<GenerateResponse> {
        let body = conversion::to_chat_request(req, &self.default_model)?;
        let url = self.completions_url();
        debug!(url = %url, messages = body.messages().len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(key.expose())
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Chat completion request failed");
            return Err(ProviderError::new(status_error(status.as_u16(), message)).into());
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::ResponseParsing(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        conversion::from_chat_response(&chat)
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overloaded_provider_is_a_rate_limit() {
        let kind = status_error(503, "upstream down".to_string());
        assert_eq!(
            kind,
            ProviderErrorKind::RateLimit("HTTP 503: upstream down".to_string())
        );
        assert!(kind.is_throttled());
    }

    #[test]
    fn test_client_errors_stay_api_errors() {
        let kind = status_error(401, "bad key".to_string());
        assert!(matches!(kind, ProviderErrorKind::Api { status: 401, .. }));
        assert!(!kind.is_throttled());
    }
}
