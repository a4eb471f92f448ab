use std::sync::Arc;

use derive_setters::Setters;

/// A single text-generation call.
#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(into)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Sampling temperature; the provider default applies when unset.
    #[setters(strip_option)]
    pub temperature: Option<f64>,
    /// Ask the provider for a JSON response body instead of free text.
    pub json_output: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), temperature: None, json_output: false }
    }
}

/// Opaque text-generation capability. Authentication, model selection and
/// retries belong to the implementation.
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<String>;
}

#[async_trait::async_trait]
impl<T: GenerationService + ?Sized> GenerationService for Arc<T> {
    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<String> {
        self.as_ref().generate(request).await
    }
}
