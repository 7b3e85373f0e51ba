//! Configuration management for quizgen
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! Precedence, lowest first: defaults, YAML file, `QUIZGEN_*` environment
//! variables, command-line flags.

use crate::chunker::DEFAULT_CHUNK_SIZE;
use crate::error::{QuizgenError, Result};
use crate::generator::Difficulty;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Supported provider type names
pub const PROVIDER_TYPES: [&str; 2] = ["openai", "ollama"];

/// Upper bound on questions requested per chunk
pub const MAX_QUESTIONS_PER_CHUNK: usize = 50;

/// Upper bound on in-flight generation requests
pub const MAX_CONCURRENT_REQUESTS: usize = 32;

/// Main configuration structure for quizgen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (OpenAI, Ollama)
    pub provider: ProviderConfig,
    /// Question generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Provider configuration
///
/// Specifies which LLM provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// OpenAI-compatible provider configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "openai".to_string(),
            openai: OpenAiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Model of the selected provider
    pub fn active_model(&self) -> &str {
        match self.provider_type.as_str() {
            "ollama" => &self.ollama.model,
            _ => &self.openai.model,
        }
    }

    /// Override the model of the selected provider
    pub fn set_active_model(&mut self, model: impl Into<String>) {
        match self.provider_type.as_str() {
            "ollama" => self.ollama.model = model.into(),
            _ => self.openai.model = model.into(),
        }
    }
}

/// OpenAI-compatible provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Model to request
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API base URL; `/chat/completions` is appended
    ///
    /// Point this at a mock server in tests or at any OpenAI-compatible
    /// endpoint.
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Completion token limit sent with each request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: Option<u32>,
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_tokens() -> Option<u32> {
    Some(4096)
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_base: default_openai_api_base(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Question generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Questions requested from each chunk
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,

    /// Difficulty label passed to the prompt
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Generation requests allowed in flight at once (1 = sequential)
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Hard timeout for each generation request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_num_questions() -> usize {
    5
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_max_concurrent_requests() -> usize {
    4
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_questions: default_num_questions(),
            difficulty: Difficulty::default(),
            chunk_size: default_chunk_size(),
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl GenerationConfig {
    /// Chunk size as a non-zero count
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `chunk_size` is zero.
    pub fn chunk_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.chunk_size).ok_or_else(|| {
            QuizgenError::Config("generation.chunk_size must be greater than 0".to_string()).into()
        })
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuizgenError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| QuizgenError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("QUIZGEN_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("QUIZGEN_OPENAI_MODEL") {
            self.provider.openai.model = model;
        }

        if let Ok(api_base) = std::env::var("QUIZGEN_OPENAI_API_BASE") {
            self.provider.openai.api_base = api_base;
        }

        if let Ok(host) = std::env::var("QUIZGEN_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("QUIZGEN_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Some(v) = parsed_env("QUIZGEN_NUM_QUESTIONS") {
            self.generation.num_questions = v;
        }

        if let Some(v) = parsed_env("QUIZGEN_DIFFICULTY") {
            self.generation.difficulty = v;
        }

        if let Some(v) = parsed_env("QUIZGEN_CHUNK_SIZE") {
            self.generation.chunk_size = v;
        }

        if let Some(v) = parsed_env("QUIZGEN_MAX_CONCURRENT") {
            self.generation.max_concurrent_requests = v;
        }

        if let Some(v) = parsed_env("QUIZGEN_TIMEOUT_SECONDS") {
            self.generation.request_timeout_seconds = v;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let Some(args) = cli.generation_args() else {
            return;
        };

        if let Some(provider) = &args.provider {
            self.provider.provider_type = provider.clone();
        }
        if let Some(model) = &args.model {
            self.provider.set_active_model(model.clone());
        }
        if let Some(n) = args.questions {
            self.generation.num_questions = n;
        }
        if let Some(difficulty) = args.difficulty {
            self.generation.difficulty = difficulty;
        }
        if let Some(size) = args.chunk_size {
            self.generation.chunk_size = size;
        }
        if let Some(n) = args.max_concurrent {
            self.generation.max_concurrent_requests = n;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(QuizgenError::Config("Provider type cannot be empty".to_string()).into());
        }

        if !PROVIDER_TYPES.contains(&self.provider.provider_type.as_str()) {
            return Err(QuizgenError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                PROVIDER_TYPES.join(", ")
            ))
            .into());
        }

        if self.provider.active_model().trim().is_empty() {
            return Err(QuizgenError::Config("Model name cannot be empty".to_string()).into());
        }

        let generation = &self.generation;

        if generation.num_questions == 0 || generation.num_questions > MAX_QUESTIONS_PER_CHUNK {
            return Err(QuizgenError::Config(format!(
                "generation.num_questions must be between 1 and {}",
                MAX_QUESTIONS_PER_CHUNK
            ))
            .into());
        }

        generation.chunk_size()?;

        if generation.max_concurrent_requests == 0
            || generation.max_concurrent_requests > MAX_CONCURRENT_REQUESTS
        {
            return Err(QuizgenError::Config(format!(
                "generation.max_concurrent_requests must be between 1 and {}",
                MAX_CONCURRENT_REQUESTS
            ))
            .into());
        }

        if generation.request_timeout_seconds == 0 {
            return Err(QuizgenError::Config(
                "generation.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Read and parse an environment variable, warning on bad values
fn parsed_env<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => {
            tracing::debug!("Env override: {}={}", name, raw);
            Some(value)
        }
        Err(_) => {
            tracing::warn!("Invalid {}: {}", name, raw);
            None
        }
    }
}
