/*!
 * Language model providers.
 *
 * - Ollama: local LLM server over HTTP
 * - Mock: scripted provider used by tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// Implementations own their transport; callers build a provider-neutral
/// `PromptRequest` and convert it into the provider's own request type.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// List the model names the provider can serve
    async fn available_models(&self) -> Result<Vec<String>, ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Provider-neutral single-turn prompt
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// Model to run
    pub model: String,
    /// Optional system message
    pub system: Option<String>,
    /// User message
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Ask the provider to constrain its output to a JSON object
    pub json_output: bool,
}

impl PromptRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: prompt.into(),
            temperature: 0.3,
            json_output: false,
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

pub mod mock;
pub mod ollama;
