//! End-to-end quiz generation
//!
//! Runs extraction, chunking, generation and parsing in that order. Fatal
//! preconditions (bad configuration, missing credentials, unreadable
//! document) abort before any request is sent. Per-chunk failures and
//! rejected blocks are carried in the [`PipelineOutcome`] as diagnostics.

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::chunker::chunk_text;
use crate::config::Config;
use crate::document::{extract_text, load_document, DocumentKind};
use crate::error::{QuizgenError, Result};
use crate::generator::{ChunkFailure, QuestionGenerator};
use crate::parser::{parse_reply, ParseSkip};
use crate::providers::{create_provider, Provider};
use crate::quiz::Question;

/// Questions produced from one document, with diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    /// Accepted questions, in chunk then block order
    pub questions: Vec<Question>,
    /// Blocks the parser rejected
    pub skipped: Vec<ParseSkip>,
    /// Chunks whose generation request failed
    pub failures: Vec<ChunkFailure>,
    /// Number of chunks the document was split into
    pub chunk_count: usize,
}

/// Document-to-questions pipeline
#[derive(Debug, Clone)]
pub struct QuizPipeline {
    generator: QuestionGenerator,
    chunk_size: NonZeroUsize,
}

impl QuizPipeline {
    /// Build a pipeline from configuration, constructing the provider
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails, or
    /// `MissingCredentials` if the selected provider has no API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let provider = create_provider(&config.provider, config.generation.request_timeout())?;
        Self::new(Arc::from(provider), config)
    }

    /// Build a pipeline around an existing provider
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the chunk size is zero.
    pub fn new(provider: Arc<dyn Provider>, config: &Config) -> Result<Self> {
        let chunk_size = config.generation.chunk_size()?;
        Ok(Self {
            generator: QuestionGenerator::new(provider, &config.generation),
            chunk_size,
        })
    }

    /// Generate questions from already extracted text
    ///
    /// # Errors
    ///
    /// Returns `QuizgenError::Extraction` for whitespace-only text and
    /// `QuizgenError::NoQuestions` if no question survives parsing.
    pub async fn run_text(&self, text: &str) -> Result<PipelineOutcome> {
        if text.trim().is_empty() {
            return Err(QuizgenError::Extraction("no text found in document".to_string()).into());
        }

        let chunks: Vec<&str> = chunk_text(text, self.chunk_size).collect();
        tracing::info!(
            "Split document into {} chunks of at most {} characters",
            chunks.len(),
            self.chunk_size
        );

        let generation = self.generator.generate_all(chunks.iter().copied()).await;
        let parsed = parse_reply(&generation.combined_reply());

        tracing::info!(
            questions = parsed.questions.len(),
            skipped = parsed.skipped.len(),
            failed_chunks = generation.failures.len(),
            "Generation finished"
        );

        if parsed.questions.is_empty() {
            return Err(QuizgenError::NoQuestions.into());
        }

        Ok(PipelineOutcome {
            questions: parsed.questions,
            skipped: parsed.skipped,
            failures: generation.failures,
            chunk_count: chunks.len(),
        })
    }

    /// Generate questions from in-memory document bytes
    pub async fn run_bytes(&self, bytes: &[u8], kind: DocumentKind) -> Result<PipelineOutcome> {
        let text = extract_text(bytes, kind)?;
        self.run_text(&text).await
    }

    /// Generate questions from a document on disk
    pub async fn run_path(&self, path: impl AsRef<Path>) -> Result<PipelineOutcome> {
        let text = load_document(path)?;
        self.run_text(&text).await
    }
}
