//! OpenAI-compatible chat-completion backend

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::{is_usable_api_key, LlmConfig};
use crate::error::{AppError, Result};

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            name: None,
        }
    }
}

/// Chat completion request (OpenAI compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Chat choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Sampling parameters applied to every request
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl CompletionParams {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for chat-completion providers
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Provider tag recorded in chat logs
    fn name(&self) -> &str;

    /// Whether a usable key is available
    fn is_configured(&self) -> bool;

    /// Model used when the caller does not pick one
    fn default_model(&self) -> &str;

    /// Same provider, different credentials
    fn with_api_key(&self, api_key: String) -> Arc<dyn ChatBackend>;

    /// Chat completion
    async fn chat_completion(&self, request: ChatCompletionRequest)
        -> Result<ChatCompletionResponse>;
}

/// OpenAI API compatible backend
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    /// Create a backend from configuration, resolving the key from the environment
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
        })
    }

    fn get_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
            headers.insert(AUTHORIZATION, value);
        }

        headers
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn with_api_key(&self, api_key: String) -> Arc<dyn ChatBackend> {
        let mut backend = self.clone();
        backend.api_key = Some(api_key).filter(|key| is_usable_api_key(key));
        Arc::new(backend)
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let token = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;
        let url = format!("{}/chat/completions", self.base_url);

        debug!(url = %url, model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .headers(self.get_headers(token))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response.json::<ChatCompletionResponse>().await.map_err(|e| {
                error!(error = %e, "Failed to parse chat completion response");
                AppError::Upstream(format!("Failed to parse response: {}", e))
            });
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(status = %status, "Provider rejected API key");
                Err(AppError::InvalidApiKey)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(status = %status, "Provider quota exceeded");
                Err(AppError::QuotaExceeded)
            }
            _ => Err(AppError::Upstream(format!(
                "Backend returned {}: {}",
                status, body
            ))),
        }
    }
}

/// Send one system prompt and one user message, return the trimmed answer
pub async fn complete(
    backend: &dyn ChatBackend,
    system_prompt: &str,
    user_message: &str,
    params: &CompletionParams,
) -> Result<String> {
    let request = ChatCompletionRequest {
        model: params.model.clone(),
        messages: vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ],
        temperature: Some(params.temperature),
        max_tokens: Some(params.max_tokens),
        presence_penalty: Some(params.presence_penalty),
        frequency_penalty: Some(params.frequency_penalty),
        user: None,
    };

    let response = backend.chat_completion(request).await?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::Upstream("Empty completion".to_string()))
}
