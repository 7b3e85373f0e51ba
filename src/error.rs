//! Error types for quizgen
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for quizgen operations
///
/// Fatal preconditions (`Config`, `MissingCredentials`, `Extraction`) abort a
/// generation request. Per-chunk `Generation`/`Provider` failures are
/// isolated by the generator and never abort the pipeline on their own.
#[derive(Error, Debug)]
pub enum QuizgenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Document could not be turned into text
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Provider-related errors (API calls, bad responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// A single generation request failed or timed out
    #[error("Generation error: {0}")]
    Generation(String),

    /// Generation finished but no question survived parsing
    #[error("No valid questions could be generated from the document")]
    NoQuestions,

    /// A question record violates the four-option/correct-option invariant
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    /// Selected option is not one of the question's options
    #[error("Invalid answer for question {index}: {selected:?} is not one of its options")]
    InvalidAnswer {
        /// Zero-based question index
        index: usize,
        /// The rejected selection
        selected: String,
    },

    /// Question index outside the session
    #[error("Question index {index} out of range (session has {len} questions)")]
    QuestionIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of questions in the session
        len: usize,
    },

    /// Operation requires a started session
    #[error("Quiz session has not been started")]
    SessionNotStarted,

    /// Ratio over zero questions
    #[error("Division undefined: the quiz has no questions")]
    DivisionUndefined,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl QuizgenError {
    /// Returns true for errors that must abort a whole generation request
    ///
    /// # Examples
    ///
    /// ```
    /// use quizgen::error::QuizgenError;
    ///
    /// assert!(QuizgenError::Config("bad".to_string()).is_fatal());
    /// assert!(!QuizgenError::Generation("timeout".to_string()).is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            QuizgenError::Config(_)
                | QuizgenError::MissingCredentials(_)
                | QuizgenError::Extraction(_)
                | QuizgenError::NoQuestions
        )
    }
}

/// Result type alias for quizgen operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = QuizgenError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = QuizgenError::MissingCredentials("openai".to_string());
        assert_eq!(error.to_string(), "Missing credentials for provider: openai");
    }

    #[test]
    fn test_extraction_error_display() {
        let error = QuizgenError::Extraction("encrypted pdf".to_string());
        assert_eq!(error.to_string(), "Extraction error: encrypted pdf");
    }

    #[test]
    fn test_invalid_answer_error_display() {
        let error = QuizgenError::InvalidAnswer {
            index: 2,
            selected: "E) 7".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("question 2"));
        assert!(s.contains("E) 7"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let error = QuizgenError::QuestionIndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            error.to_string(),
            "Question index 5 out of range (session has 3 questions)"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(QuizgenError::MissingCredentials("openai".into()).is_fatal());
        assert!(QuizgenError::Extraction("empty".into()).is_fatal());
        assert!(QuizgenError::NoQuestions.is_fatal());
        assert!(!QuizgenError::Provider("500".into()).is_fatal());
        assert!(!QuizgenError::DivisionUndefined.is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: QuizgenError = io_error.into();
        assert!(matches!(error, QuizgenError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: QuizgenError = json_error.into();
        assert!(matches!(error, QuizgenError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: QuizgenError = yaml_error.into();
        assert!(matches!(error, QuizgenError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QuizgenError>();
    }
}
