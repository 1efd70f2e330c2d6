/*!
 * Mock provider for testing.
 *
 * Simulates the behaviours the enhancement layer must survive:
 * - `MockProvider::working()` - answers every prompt with a JSON interpretation
 * - `MockProvider::intermittent(n)` - fails every nth request
 * - `MockProvider::failing()` - always fails, including the connection test
 * - `MockProvider::malformed()` - answers with text that is not JSON
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{PromptRequest, Provider};

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// Model asked for
    pub model: String,
    /// Full user prompt
    pub prompt: String,
    /// Whether JSON output was requested
    pub json_output: bool,
}

impl From<PromptRequest> for MockRequest {
    fn from(request: PromptRequest) -> Self {
        Self {
            model: request.model,
            prompt: request.prompt,
            json_output: request.json_output,
        }
    }
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a JSON interpretation
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Answers with prose instead of JSON
    Malformed,
    /// Returns empty response
    Empty,
}

/// Mock provider for testing enhancement behavior
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
    /// Models reported by `available_models`
    models: Vec<String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
            models: vec!["qwen3:4b".to_string()],
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Replace the list of installed models
    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Number of `complete` calls so far, across clones
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Canned interpretation used by the working behaviour
    pub fn default_interpretation() -> String {
        serde_json::json!({
            "pinyin": "mock pinyin",
            "english": "mock translation",
            "word_details": []
        })
        .to_string()
    }

    fn answer(&self, request: &MockRequest) -> MockResponse {
        let text = match self.custom_response {
            Some(generator) => generator(request),
            None => Self::default_interpretation(),
        };
        MockResponse { text }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
            models: self.models.clone(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.answer(&request)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.answer(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Malformed => Ok(MockResponse {
                text: "Sure! Here is the pinyin you asked for.".to_string(),
            }),

            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection refused".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn available_models(&self) -> Result<Vec<String>, ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection refused".to_string(),
            )),
            _ => Ok(self.models.clone()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
