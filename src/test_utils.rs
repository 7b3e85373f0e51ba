//! Test utilities for quizgen
//!
//! This module provides common test utilities including temporary file
//! management, sample replies and questions, and assertion helpers.

use crate::config::Config;
use crate::error::QuizgenError;
use crate::quiz::Question;
use std::path::PathBuf;
use tempfile::TempDir;

/// A well-formed two-question model reply
pub const SAMPLE_REPLY: &str = "\
1. What is the capital of France?
A) Berlin
B) Madrid
C) Paris
D) Rome
Correct Answer: C

2. Which planet is known as the Red Planet?
A) Venus
B) Mars
C) Jupiter
D) Saturn
Correct Answer: B";

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// The question "What is 2+2?" with "B) 4" correct
pub fn sample_question() -> Question {
    Question::new(
        "What is 2+2?",
        vec!["A) 3".into(), "B) 4".into(), "C) 5".into(), "D) 6".into()],
        "B) 4",
    )
    .expect("sample question is valid")
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, QuizgenError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration pointing at a local Ollama server
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.provider_type = "ollama".to_string();
    config.generation.max_concurrent_requests = 1;
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_reply;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_sample_reply_parses_cleanly() {
        let outcome = parse_reply(SAMPLE_REPLY);
        assert_eq!(outcome.questions.len(), 2);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.questions[1].correct_option(), "B) Mars");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), QuizgenError> = Err(QuizgenError::SessionNotStarted);
        assert_error_contains(result, "not been started");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), QuizgenError> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = test_config();
        assert_eq!(config.provider.provider_type, "ollama");
        assert!(config.validate().is_ok());
    }
}
