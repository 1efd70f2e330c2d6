/*!
 * The phrase interpretation seam.
 *
 * `Interpreter` is what the merge layer calls once per unique phrase.
 * `LlmInterpreter` implements it on top of any `Provider` whose request type
 * can be built from a `PromptRequest`.
 */

use async_trait::async_trait;
use log::{debug, warn};

use super::OutputMode;
use super::interpretation::Interpretation;
use super::prompts;
use crate::app_config::EnhancementConfig;
use crate::errors::ProviderError;
use crate::providers::{PromptRequest, Provider};

/// Number of installed model names echoed in a `ModelNotFound` error
const MODELS_IN_ERROR: usize = 5;

/// Turns a cleaned phrase into an `Interpretation`
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Interpret `text` for `mode`
    async fn interpret(&self, text: &str, mode: OutputMode) -> Result<Interpretation, ProviderError>;

    /// Verify the backing service can answer before a run starts
    async fn check_ready(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Interpreter backed by a language model provider
#[derive(Debug)]
pub struct LlmInterpreter<P: Provider> {
    provider: P,
    model: String,
    temperature: f32,
    /// Extra attempts when the reply cannot be parsed
    parse_retries: u32,
}

impl<P: Provider> LlmInterpreter<P> {
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.3,
            parse_retries: 0,
        }
    }

    /// Create an interpreter using the model and sampling settings of `config`
    pub fn from_config(provider: P, config: &EnhancementConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.temperature,
            parse_retries: config.max_retries,
        }
    }

    pub fn with_parse_retries(mut self, retries: u32) -> Self {
        self.parse_retries = retries;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Whether `available` lists a model matching the base name of `model`
pub fn model_available(model: &str, available: &[String]) -> bool {
    let base = model.split(':').next().unwrap_or(model);
    available.iter().any(|name| name.contains(base))
}

#[async_trait]
impl<P> Interpreter for LlmInterpreter<P>
where
    P: Provider,
    P::Request: From<PromptRequest>,
{
    async fn interpret(&self, text: &str, mode: OutputMode) -> Result<Interpretation, ProviderError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Interpretation::empty());
        }

        let prompt = prompts::build_prompt(mode, text);
        let mut attempt = 0;
        loop {
            let request = PromptRequest::new(self.model.clone(), prompt.clone())
                .temperature(self.temperature)
                .json();
            let response = self.provider.complete(P::Request::from(request)).await?;
            let reply = P::extract_text(&response);

            match prompts::parse_interpretation(mode, &reply) {
                Ok(interpretation) => {
                    debug!("Interpreted '{}' as '{}'", text, interpretation.romanization);
                    return Ok(interpretation);
                }
                Err(e) if attempt < self.parse_retries => {
                    attempt += 1;
                    warn!(
                        "Unusable reply for '{}' ({}), retrying {}/{}",
                        text, e, attempt, self.parse_retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn check_ready(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await?;
        let available = self.provider.available_models().await?;
        if model_available(&self.model, &available) {
            return Ok(());
        }

        Err(ProviderError::ModelNotFound {
            model: self.model.clone(),
            available: available.iter().take(MODELS_IN_ERROR).cloned().collect::<Vec<_>>().join(", "),
        })
    }
}
