use std::time::Duration;

use anyhow::Context as _;
use casegen_config::{Config, RetryConfig};
use casegen_domain::{GenerationRequest, GenerationService};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::dto::{ErrorResponse, GenerationConfig, Request, Response};
use crate::{ApiError, into_retry, retry_with_config};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const JSON_MIME_TYPE: &str = "application/json";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    model: String,
    retry_config: RetryConfig,
}

impl GeminiClient {
    /// The key is only required once a request is made, so a client without
    /// one can still back commands that never call the model.
    pub fn new(api_key: Option<String>, config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            retry_config: config.retry.clone(),
        })
    }

    /// Builds a client using the API key from [`API_KEY_VAR`], if set.
    pub fn from_env(config: &Config) -> anyhow::Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self::new(api_key, config)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    // Models are addressed in the URL path:
    // {base_url}/models/{model}:generateContent
    fn url(&self) -> anyhow::Result<Url> {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        let full_url = format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            model
        );
        Url::parse(&full_url).with_context(|| "Failed to construct Gemini API URL")
    }

    fn request_body(request: &GenerationRequest) -> Request {
        let mut body = Request::from_prompt(request.prompt.clone());
        let response_mime_type = request.json_output.then(|| JSON_MIME_TYPE.to_string());
        if request.temperature.is_some() || response_mime_type.is_some() {
            body.generation_config =
                Some(GenerationConfig { temperature: request.temperature, response_mime_type });
        }
        body
    }

    async fn send(&self, api_key: &str, url: &Url, body: &Request) -> anyhow::Result<String> {
        debug!(url = %url, model = %self.model, "Sending generation request");

        let response = self
            .client
            .post(url.clone())
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| into_retry(e.into(), &self.retry_config))
            .with_context(|| format!("POST {url}"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| into_retry(e.into(), &self.retry_config))
            .with_context(|| format!("Failed to read response body ({status})"))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| match e.error.status {
                    Some(kind) => format!("{kind}: {}", e.error.message),
                    None => e.error.message,
                })
                .unwrap_or(text);
            let error = ApiError { status: status.as_u16(), message };
            return Err(into_retry(error.into(), &self.retry_config));
        }

        let response: Response = serde_json::from_str(&text)
            .with_context(|| "Failed to deserialize generation response")?;

        match response.text() {
            Some(text) => Ok(text),
            None => match response.block_reason() {
                Some(reason) => anyhow::bail!("Prompt was blocked by the provider: {reason}"),
                None => {
                    tracing::warn!("Generation response contained no candidates");
                    Ok(String::new())
                }
            },
        }
    }
}

#[async_trait::async_trait]
impl GenerationService for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .with_context(|| format!("{API_KEY_VAR} is not set"))?;
        let url = self.url()?;
        let body = Self::request_body(&request);

        retry_with_config(&self.retry_config, || self.send(api_key, &url, &body))
            .await
            .with_context(|| format!("Generation with model '{}' failed", self.model))
    }
}
