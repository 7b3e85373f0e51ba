//! quizgen - Multiple-choice quizzes from documents
//!
//! This library turns a document into a multiple-choice quiz: it extracts
//! the text, splits it into chunks, asks an LLM provider for questions per
//! chunk, parses the replies into validated questions, and scores a quiz
//! session.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `document`: PDF and plain-text extraction
//! - `chunker`: Fixed-size character chunking
//! - `providers`: AI provider abstraction and implementations (OpenAI, Ollama)
//! - `generator`: Bounded-concurrency question generation per chunk
//! - `parser`: Reply parsing into validated questions
//! - `quiz`: Question model and quiz session scoring
//! - `pipeline`: End-to-end document-to-questions orchestration
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use quizgen::{Config, QuizPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let pipeline = QuizPipeline::from_config(&config)?;
//!     let outcome = pipeline.run_path("lecture.pdf").await?;
//!     println!("{} questions", outcome.questions.len());
//!     Ok(())
//! }
//! ```

pub mod chunker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod quiz;

// Re-export commonly used types
pub use config::Config;
pub use error::{QuizgenError, Result};
pub use generator::{Difficulty, QuestionGenerator};
pub use parser::{parse_reply, ParseOutcome, ParseSkip};
pub use pipeline::{PipelineOutcome, QuizPipeline};
pub use quiz::{Question, QuizSession};

#[cfg(test)]
pub mod test_utils;
