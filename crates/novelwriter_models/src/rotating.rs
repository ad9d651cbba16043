//! Text generation with credential rotation.

use crate::clean_response;
use async_trait::async_trait;
use novelwriter_core::{GenerateRequest, Message};
use novelwriter_error::{BuilderError, BuilderErrorKind, NovelwriterResult};
use novelwriter_interface::{NovelwriterDriver, TextGenerator};
use novelwriter_rate_limit::{CredentialManager, ProviderSettings, Tier, with_rotation};
use std::sync::Mutex;
use tracing::{debug, instrument, trace};

/// Sends prompts through a driver, rotating credentials on quota failures.
///
/// The model follows the credential's tier: free keys use the primary model
/// and paid keys the secondary one.
///
/// # Examples
///
/// ```no_run
/// use novelwriter_interface::TextGenerator;
/// use novelwriter_models::{OpenRouterClient, RotatingGenerator};
/// use novelwriter_rate_limit::{CredentialManager, NovelwriterConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NovelwriterConfig::load()?;
/// let manager = CredentialManager::new(config.credential_pools())?;
/// let driver = OpenRouterClient::new(&config.provider)?;
/// let generator = RotatingGenerator::new(driver, manager, config.provider.clone());
///
/// let reply = generator.complete("Name three cozy mystery tropes.").await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RotatingGenerator<D> {
    driver: D,
    manager: Mutex<CredentialManager>,
    settings: ProviderSettings,
}

impl<D: NovelwriterDriver> RotatingGenerator<D> {
    /// Wrap a driver with a credential manager.
    pub fn new(driver: D, manager: CredentialManager, settings: ProviderSettings) -> Self {
        Self {
            driver,
            manager: Mutex::new(manager),
            settings,
        }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Pool currently handing out credentials, if the lock is healthy.
    pub fn active_tier(&self) -> Option<Tier> {
        self.manager.lock().ok().map(|manager| manager.active_tier())
    }

    fn request_for(&self, prompt: &str, tier: Tier) -> NovelwriterResult<GenerateRequest> {
        GenerateRequest::builder()
            .messages(vec![Message::user(prompt)])
            .max_tokens(Some(self.settings.max_tokens))
            .temperature(Some(self.settings.temperature))
            .model(Some(self.settings.model_for(tier).to_string()))
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())).into())
    }
}

#[async_trait]
impl<D: NovelwriterDriver> TextGenerator for RotatingGenerator<D> {
    #[instrument(
        skip(self, prompt),
        fields(provider = self.driver.provider_name(), prompt_len = prompt.len())
    )]
    async fn complete(&self, prompt: &str) -> NovelwriterResult<String> {
        trace!(prompt = %prompt, "Prompt");
        let response = with_rotation(&self.manager, self.settings.max_attempts, |key, tier| {
            let request = self.request_for(prompt, tier);
            async move {
                let request = request?;
                debug!(tier = %tier, billing = tier.billing_label(), model = ?request.model, "Requesting completion");
                self.driver.generate(&key, &request).await
            }
        })
        .await?;

        let text = clean_response(&response.text());
        debug!(reply_len = text.len(), "Received completion");
        trace!(reply = %text, "Reply");
        Ok(text)
    }
}
