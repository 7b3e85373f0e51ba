//! Reply parser for generated multiple-choice questions
//!
//! Turns the free-text reply of the generation provider into validated
//! [`Question`] records. The reply is split on blank lines into blocks and
//! each block is parsed on its own: a malformed block yields a [`ParseSkip`]
//! diagnostic and never affects its neighbours.
//!
//! Expected block shape:
//!
//! ```text
//! 1. What is 2+2?
//! A) 3
//! B) 4
//! C) 5
//! D) 6
//! Correct Answer: B
//! ```
//!
//! # Examples
//!
//! ```
//! use quizgen::parser::parse_reply;
//!
//! let outcome = parse_reply("What is 2+2?\nA) 3\nB) 4\nC) 5\nD) 6\nCorrect Answer: B");
//! assert_eq!(outcome.questions.len(), 1);
//! assert_eq!(outcome.questions[0].correct_option(), "B) 4");
//! assert!(outcome.skipped.is_empty());
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::quiz::{option_label, Question, OPTION_COUNT};

/// Blank line: a newline, optional horizontal whitespace, a newline
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid block separator regex"));

/// `A) text` .. `D) text`, with non-empty text
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])\)\s*\S").expect("valid option regex"));

/// `Correct Answer: B`, tolerant of case and spacing
static CORRECT_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)correct\s+answer\s*:\s*\(?([a-d])\b").expect("valid correct answer regex")
});

/// Why a block was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Block did not contain exactly four option lines
    WrongOptionCount {
        /// Number of option lines found
        found: usize,
    },
    /// The same option label appeared more than once
    DuplicateOptionLabel {
        /// Repeated label
        label: char,
    },
    /// No `Correct Answer:` line
    MissingCorrectAnswer,
    /// Several `Correct Answer:` lines naming different letters
    AmbiguousCorrectAnswer {
        /// Distinct letters named, in order of appearance
        letters: Vec<char>,
    },
    /// The correct letter names an option that is not present
    UnmatchedCorrectLetter {
        /// Letter from the marker line
        letter: char,
    },
    /// Parsed fields failed question validation
    InvalidQuestion {
        /// Validation message
        message: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::WrongOptionCount { found } => {
                write!(f, "expected {} options, found {}", OPTION_COUNT, found)
            }
            SkipReason::DuplicateOptionLabel { label } => {
                write!(f, "option {} listed more than once", label)
            }
            SkipReason::MissingCorrectAnswer => write!(f, "missing 'Correct Answer' line"),
            SkipReason::AmbiguousCorrectAnswer { letters } => {
                let letters: Vec<String> = letters.iter().map(char::to_string).collect();
                write!(f, "ambiguous correct answer: {}", letters.join(", "))
            }
            SkipReason::UnmatchedCorrectLetter { letter } => {
                write!(f, "correct answer {} has no matching option", letter)
            }
            SkipReason::InvalidQuestion { message } => write!(f, "{}", message),
        }
    }
}

/// Diagnostic for a rejected block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseSkip {
    /// Zero-based index of the block among non-empty blocks
    pub block_index: usize,
    /// First non-empty line of the block
    pub question_text: String,
    /// Why the block was rejected
    pub reason: SkipReason,
}

impl fmt::Display for ParseSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping invalid question #{} ({:?}): {}",
            self.block_index + 1,
            self.question_text,
            self.reason
        )
    }
}

/// Result of parsing a reply
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutcome {
    /// Accepted questions, in block order
    pub questions: Vec<Question>,
    /// Diagnostics for rejected blocks, in block order
    pub skipped: Vec<ParseSkip>,
}

/// Split a reply into candidate question blocks
///
/// Whitespace-only blocks are dropped.
pub fn split_blocks(reply: &str) -> impl Iterator<Item = &str> {
    BLOCK_SEPARATOR
        .split(reply)
        .filter(|block| !block.trim().is_empty())
}

/// Parse one or more concatenated replies into questions
///
/// Each rejected block is logged at `warn` level and reported in
/// [`ParseOutcome::skipped`]; accepted questions keep their block order and
/// are neither sorted nor deduplicated.
pub fn parse_reply(reply: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (block_index, block) in split_blocks(reply).enumerate() {
        match parse_block(block_index, block) {
            Ok(question) => outcome.questions.push(question),
            Err(skip) => {
                tracing::warn!("{}", skip);
                outcome.skipped.push(skip);
            }
        }
    }

    tracing::debug!(
        accepted = outcome.questions.len(),
        skipped = outcome.skipped.len(),
        "Parsed generation reply"
    );

    outcome
}

/// Parse a single block into a question
///
/// # Errors
///
/// Returns a [`ParseSkip`] describing why the block was rejected.
pub fn parse_block(block_index: usize, block: &str) -> Result<Question, ParseSkip> {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
    let question_text = lines.next().unwrap_or_default().to_string();

    let skip = |reason: SkipReason| ParseSkip {
        block_index,
        question_text: question_text.clone(),
        reason,
    };

    let mut options: Vec<String> = Vec::new();
    let mut letters: Vec<char> = Vec::new();

    for line in lines {
        if OPTION_LINE.is_match(line) {
            options.push(line.to_string());
        }
        if let Some(caps) = CORRECT_ANSWER.captures(line) {
            let letter = caps[1]
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_default();
            if !letters.contains(&letter) {
                letters.push(letter);
            }
        }
    }

    if options.len() != OPTION_COUNT {
        return Err(skip(SkipReason::WrongOptionCount {
            found: options.len(),
        }));
    }

    let mut labels: Vec<char> = Vec::with_capacity(OPTION_COUNT);
    for label in options.iter().filter_map(|o| option_label(o)) {
        if labels.contains(&label) {
            return Err(skip(SkipReason::DuplicateOptionLabel { label }));
        }
        labels.push(label);
    }

    let letter = match letters.as_slice() {
        [] => return Err(skip(SkipReason::MissingCorrectAnswer)),
        [letter] => *letter,
        _ => {
            return Err(skip(SkipReason::AmbiguousCorrectAnswer {
                letters: letters.clone(),
            }))
        }
    };

    let correct = options
        .iter()
        .find(|o| option_label(o) == Some(letter))
        .cloned()
        .ok_or_else(|| skip(SkipReason::UnmatchedCorrectLetter { letter }))?;

    Question::new(question_text.clone(), options, correct).map_err(|e| {
        skip(SkipReason::InvalidQuestion {
            message: e.to_string(),
        })
    })
}
