//! Provider module for quizgen
//!
//! This module contains the AI provider abstraction and implementations
//! for OpenAI-compatible servers and Ollama.

pub mod base;
pub mod ollama;
pub mod openai;

pub use base::{CompletionResponse, Message, Provider, TokenUsage};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::{QuizgenError, Result};
use std::time::Duration;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration; `provider_type` selects the backend
/// * `timeout` - HTTP timeout applied to every request
///
/// # Errors
///
/// Returns error if the provider type is unknown, credentials are missing,
/// or the HTTP client cannot be built
pub fn create_provider(config: &ProviderConfig, timeout: Duration) -> Result<Box<dyn Provider>> {
    create_provider_with_override(config, None, None, timeout)
}

/// Create a provider instance with optional provider and model overrides
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use quizgen::config::ProviderConfig;
/// use quizgen::providers::create_provider_with_override;
///
/// let config = ProviderConfig::default();
/// let provider = create_provider_with_override(
///     &config,
///     Some("ollama"),
///     Some("llama3.2:1b"),
///     Duration::from_secs(30),
/// )
/// .unwrap();
/// assert_eq!(provider.get_current_model().unwrap(), "llama3.2:1b");
/// ```
pub fn create_provider_with_override(
    config: &ProviderConfig,
    provider_override: Option<&str>,
    model_override: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn Provider>> {
    let provider_type = provider_override.unwrap_or(&config.provider_type);

    match provider_type {
        "openai" => {
            let mut openai_config = config.openai.clone();
            if let Some(model) = model_override {
                openai_config.model = model.to_string();
            }

            Ok(Box::new(OpenAiProvider::with_timeout(openai_config, timeout)?))
        }
        "ollama" => {
            let mut ollama_config = config.ollama.clone();
            if let Some(model) = model_override {
                ollama_config.model = model.to_string();
            }

            Ok(Box::new(OllamaProvider::with_timeout(ollama_config, timeout)?))
        }
        _ => Err(QuizgenError::Config(format!("Unknown provider type: {}", provider_type)).into()),
    }
}
