//! Prompts for question generation
//!
//! Builds the chat messages sent to the provider for each chunk. The user
//! message pins down the reply format the parser expects.

use crate::generator::Difficulty;
use crate::providers::Message;

/// System prompt for question generation
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates multiple-choice questions.";

/// Builds the user prompt for one chunk
///
/// # Examples
///
/// ```
/// use quizgen::generator::Difficulty;
/// use quizgen::prompts::build_question_prompt;
///
/// let prompt = build_question_prompt("Rust is a language.", 3, Difficulty::Easy);
/// assert!(prompt.contains("Extract 3 multiple-choice questions"));
/// assert!(prompt.contains("Easy difficulty"));
/// assert!(prompt.ends_with("Rust is a language."));
/// ```
pub fn build_question_prompt(chunk: &str, num_questions: usize, difficulty: Difficulty) -> String {
    format!(
        "Extract {num_questions} multiple-choice questions from the text below with {difficulty} difficulty level.
Each question should follow this format, with a blank line between questions:
1. Question text
A) Option 1
B) Option 2
C) Option 3
D) Option 4
Correct Answer: X (where X is A, B, C, or D)

Text:
{chunk}"
    )
}

/// Builds the full message list for one chunk
pub fn build_messages(chunk: &str, num_questions: usize, difficulty: Difficulty) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(build_question_prompt(chunk, num_questions, difficulty)),
    ]
}
