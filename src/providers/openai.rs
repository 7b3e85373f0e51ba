//! OpenAI-compatible chat completions provider
//!
//! Talks to `POST {api_base}/chat/completions` with bearer authentication.
//! Any server speaking the same protocol can be targeted by overriding
//! `api_base`.

use crate::config::OpenAiConfig;
use crate::error::{QuizgenError, Result};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat completions provider
///
/// The API key is resolved when the provider is built. A missing or blank
/// key fails construction, so no request is ever sent without credentials.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenAiProvider {
    /// Create a provider, reading the API key from `config.api_key_env`
    ///
    /// # Errors
    ///
    /// Returns `QuizgenError::MissingCredentials` if the variable is unset or
    /// blank, or a provider error if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(120))
    }

    /// Like [`new`](Self::new) with an explicit HTTP timeout
    pub fn with_timeout(config: OpenAiConfig, timeout: Duration) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        if api_key.trim().is_empty() {
            tracing::error!(
                "OpenAI API key is not configured; set the {} environment variable",
                config.api_key_env
            );
        }
        Self::with_api_key(config, api_key, timeout)
    }

    /// Create a provider with an explicit API key
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use quizgen::config::OpenAiConfig;
    /// use quizgen::providers::OpenAiProvider;
    ///
    /// let missing = OpenAiProvider::with_api_key(OpenAiConfig::default(), "", Duration::from_secs(5));
    /// assert!(missing.is_err());
    ///
    /// let ok = OpenAiProvider::with_api_key(OpenAiConfig::default(), "sk-test", Duration::from_secs(5));
    /// assert!(ok.is_ok());
    /// ```
    pub fn with_api_key(
        config: OpenAiConfig,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(QuizgenError::MissingCredentials(format!(
                "openai (set {})",
                config.api_key_env
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quizgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuizgenError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized OpenAI provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            "Sending OpenAI request: model={}, {} messages",
            self.config.model,
            messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {}", e);
                QuizgenError::Provider(format!("OpenAI request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI returned error {}: {}", status, error_text);
            return Err(QuizgenError::Provider(format!(
                "OpenAI returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            QuizgenError::Provider(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                QuizgenError::Provider("OpenAI response contained no message content".to_string())
            })?;

        let message = Message::assistant(content);
        Ok(match body.usage {
            Some(usage) => CompletionResponse::with_usage(
                message,
                TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
            ),
            None => CompletionResponse::new(message),
        })
    }

    fn get_current_model(&self) -> Result<String> {
        Ok(self.config.model.clone())
    }
}
