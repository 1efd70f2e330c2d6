use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::EnhancementConfig;
use crate::errors::ProviderError;
use crate::providers::{PromptRequest, Provider};

/// Ollama client for interacting with Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API, without trailing slash
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role of the message sender (system, user or assistant)
    pub role: String,
    /// Content of the message
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Generation options for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Chat request for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model name to use for generation
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Format to return a response in
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

impl ChatRequest {
    /// Create a new non-streaming chat request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: None,
            format: None,
            stream: Some(false),
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Set the format
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl From<PromptRequest> for ChatRequest {
    fn from(request: PromptRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(request.prompt));

        let chat = ChatRequest::new(request.model, messages).temperature(request.temperature);
        if request.json_output { chat.format("json") } else { chat }
    }
}

/// Chat response from the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// Response message
    pub message: ChatMessage,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub eval_count: Option<u64>,
}

/// One entry of `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// Parse a chat body that may be a single object or a JSONL stream.
///
/// Streamed bodies are concatenated message by message; the counters of the
/// final `done` line are kept.
pub fn parse_chat_body(body: &str) -> Result<ChatResponse, ProviderError> {
    if let Ok(response) = serde_json::from_str::<ChatResponse>(body) {
        return Ok(response);
    }

    let values: Vec<serde_json::Value> = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    let Some(last) = values.last() else {
        let preview: String = body.chars().take(500).collect();
        error!("Unparseable Ollama chat response (first 500 chars): {}", preview);
        return Err(ProviderError::ParseError("Response contains invalid JSON".to_string()));
    };

    let content: String = values
        .iter()
        .filter_map(|v| v.get("message")?.get("content")?.as_str())
        .collect();
    let field = |name: &str| last.get(name).and_then(|v| v.as_str()).unwrap_or("").to_string();

    Ok(ChatResponse {
        model: field("model"),
        created_at: field("created_at"),
        message: ChatMessage {
            role: "assistant".to_string(),
            content,
        },
        done: true,
        prompt_eval_count: last.get("prompt_eval_count").and_then(|v| v.as_u64()),
        eval_count: last.get("eval_count").and_then(|v| v.as_u64()),
    })
}

fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

impl Ollama {
    /// Create a new Ollama client for `endpoint` (e.g. `http://localhost:11434`)
    pub fn new(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        }
    }

    /// Create a new Ollama client from the enhancement settings
    pub fn from_config(config: &EnhancementConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.timeout_secs,
            config.max_retries,
            config.retry_backoff_ms,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat with the Ollama API, retrying server and network failures
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.client.post(&url).json(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response
                            .text()
                            .await
                            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
                        return parse_chat_body(&body);
                    }

                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());
                    let api_error = ProviderError::ApiError {
                        status_code: status.as_u16(),
                        message,
                    };
                    if !status.is_server_error() {
                        error!("Ollama API error: {}", api_error);
                        return Err(api_error);
                    }
                    warn!(
                        "Ollama API error: {} - attempt {}/{}",
                        api_error,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(api_error);
                }
                Err(e) => {
                    let send_error = map_send_error(e);
                    warn!(
                        "Ollama network error: {} - attempt {}/{}",
                        send_error,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(send_error);
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Ollama request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }

    /// Names of the locally installed models
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "Failed to list models".to_string(),
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        debug!("Ollama reports {} model(s)", tags.models.len());
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Get the Ollama API version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_send_error)?
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        response["version"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::ParseError("Invalid version format in response".to_string()))
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.chat(&request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let version = self.version().await?;
        debug!("Connected to Ollama {}", version);
        Ok(())
    }

    async fn available_models(&self) -> Result<Vec<String>, ProviderError> {
        self.list_models().await
    }

    fn extract_text(response: &Self::Response) -> String {
        response.message.content.clone()
    }
}
