use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::{API_KEY_PLACEHOLDER, AdvisorConfig};
use crate::error::{NutritionAdvisorError, Result};
use crate::models::{CompletionRequest, CompletionResponse};

/// Seam between the session controller and the completion endpoint.
///
/// A call is a single attempt: no retries, no streaming. Implementations
/// return the assistant reply text verbatim or one of the two failure
/// classes (`Network` for connectivity and non-2xx statuses, `Processing`
/// for unusable payloads).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

pub struct OpenRouterTransport {
    client: Client,
    api_url: String,
    api_key: String,
    referer: String,
    title: String,
}

impl OpenRouterTransport {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_key == API_KEY_PLACEHOLDER {
            return Err(NutritionAdvisorError::Config(
                "OpenRouter API key not set (set OPENROUTER_API_KEY)".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                NutritionAdvisorError::Config(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
        })
    }
}

#[async_trait]
impl CompletionTransport for OpenRouterTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                NutritionAdvisorError::Network(format!("Failed to reach OpenRouter API: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NutritionAdvisorError::Network(format!(
                "OpenRouter API returned {status}: {}",
                response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string())
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            NutritionAdvisorError::Processing(format!(
                "Failed to parse OpenRouter API response: {e}"
            ))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                NutritionAdvisorError::Processing(
                    "OpenRouter API response contained no choices".to_string(),
                )
            })
    }
}
