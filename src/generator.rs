//! Question generation over document chunks
//!
//! Sends every chunk to the configured [`Provider`] and collects the raw
//! replies. Requests run with bounded concurrency and a hard per-request
//! timeout. Failures are isolated per chunk: a failed chunk is recorded in
//! [`GenerationOutcome::failures`] and contributes no text, while its
//! siblings run to completion. Replies come back in chunk order regardless
//! of completion order.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::error::{QuizgenError, Result};
use crate::prompts::build_messages;
use crate::providers::Provider;

/// Difficulty label passed through to the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy questions
    #[serde(alias = "Easy")]
    Easy,
    /// Medium questions
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    /// Hard questions
    #[serde(alias = "Hard")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Parse a difficulty, ignoring case
    ///
    /// # Examples
    ///
    /// ```
    /// use quizgen::generator::Difficulty;
    ///
    /// assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    /// assert!("impossible".parse::<Difficulty>().is_err());
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!(
                "Unknown difficulty: {} (expected easy, medium or hard)",
                other
            )),
        }
    }
}

/// A chunk whose generation request failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailure {
    /// Zero-based chunk index
    pub chunk_index: usize,
    /// Error message
    pub message: String,
}

/// Replies collected across all chunks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Successful replies, in chunk order
    pub replies: Vec<String>,
    /// Failed chunks, in chunk order
    pub failures: Vec<ChunkFailure>,
    /// Number of chunks submitted
    pub chunks_total: usize,
}

impl GenerationOutcome {
    /// All replies joined with blank-line separators, ready for parsing
    pub fn combined_reply(&self) -> String {
        self.replies.join("\n\n")
    }
}

/// Sends chunks to a provider and gathers the raw replies
#[derive(Clone)]
pub struct QuestionGenerator {
    provider: Arc<dyn Provider>,
    num_questions: usize,
    difficulty: Difficulty,
    max_concurrent: usize,
    timeout: Duration,
}

impl fmt::Debug for QuestionGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionGenerator")
            .field("num_questions", &self.num_questions)
            .field("difficulty", &self.difficulty)
            .field("max_concurrent", &self.max_concurrent)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl QuestionGenerator {
    /// Create a generator from generation settings
    pub fn new(provider: Arc<dyn Provider>, config: &GenerationConfig) -> Self {
        Self {
            provider,
            num_questions: config.num_questions,
            difficulty: config.difficulty,
            max_concurrent: config.max_concurrent_requests.max(1),
            timeout: config.request_timeout(),
        }
    }

    /// Generate the raw reply for a single chunk
    ///
    /// # Errors
    ///
    /// Returns `QuizgenError::Generation` if the provider fails or the
    /// request exceeds the configured timeout.
    pub async fn generate_chunk(&self, chunk: &str) -> Result<String> {
        let messages = build_messages(chunk, self.num_questions, self.difficulty);

        match tokio::time::timeout(self.timeout, self.provider.complete(&messages)).await {
            Ok(Ok(response)) => {
                if let Some(usage) = response.usage {
                    tracing::debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "Generation usage"
                    );
                }
                Ok(response.message.content)
            }
            Ok(Err(e)) => Err(QuizgenError::Generation(e.to_string()).into()),
            Err(_) => Err(QuizgenError::Generation(format!(
                "request timed out after {}s",
                self.timeout.as_secs_f64()
            ))
            .into()),
        }
    }

    /// Generate replies for every chunk
    ///
    /// Never fails as a whole: each chunk's error is logged and recorded.
    pub async fn generate_all<'a, I>(&self, chunks: I) -> GenerationOutcome
    where
        I: IntoIterator<Item = &'a str>,
    {
        let model = self.provider.get_current_model().unwrap_or_default();
        tracing::info!(
            model = %model,
            difficulty = %self.difficulty,
            max_concurrent = self.max_concurrent,
            "Generating questions"
        );

        let results: Vec<(usize, Result<String>)> =
            stream::iter(chunks.into_iter().enumerate().map(|(index, chunk)| async move {
                tracing::debug!("Generating questions for chunk {}", index);
                (index, self.generate_chunk(chunk).await)
            }))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut outcome = GenerationOutcome {
            chunks_total: results.len(),
            ..GenerationOutcome::default()
        };

        for (chunk_index, result) in results {
            match result {
                Ok(reply) => outcome.replies.push(reply),
                Err(e) => {
                    tracing::warn!("Error generating questions for chunk {}: {}", chunk_index, e);
                    outcome.failures.push(ChunkFailure {
                        chunk_index,
                        message: e.to_string(),
                    });
                }
            }
        }

        outcome
    }
}
