//! Validated multiple-choice question records

use crate::error::QuizgenError;
use serde::{Deserialize, Serialize};

/// Number of options every question carries
pub const OPTION_COUNT: usize = 4;

/// Option labels in canonical order
pub const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// Returns the label of an option string such as `"B) 4"`
///
/// # Examples
///
/// ```
/// use quizgen::quiz::option_label;
///
/// assert_eq!(option_label("B) 4"), Some('B'));
/// assert_eq!(option_label("E) 4"), None);
/// assert_eq!(option_label("4"), None);
/// ```
pub fn option_label(option: &str) -> Option<char> {
    let mut chars = option.chars();
    let label = chars.next()?;
    match (OPTION_LABELS.contains(&label), chars.next()) {
        (true, Some(')')) => Some(label),
        _ => None,
    }
}

/// A multiple-choice question
///
/// Holds exactly four labelled options and the option string that is
/// correct. Fields are private; a `Question` can only be obtained through
/// [`Question::new`] or deserialization, both of which validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_option: String,
}

/// Unvalidated wire shape of a [`Question`]
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    text: String,
    options: Vec<String>,
    correct_option: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuizgenError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(record.text, record.options, record.correct_option)
    }
}

impl Question {
    /// Build a question, enforcing its invariants
    ///
    /// # Errors
    ///
    /// Returns `QuizgenError::InvalidQuestion` if there are not exactly four
    /// options, if an option lacks a distinct `A)`–`D)` label, or if
    /// `correct_option` is not one of the options.
    ///
    /// # Examples
    ///
    /// ```
    /// use quizgen::quiz::Question;
    ///
    /// let q = Question::new(
    ///     "What is 2+2?",
    ///     vec!["A) 3".into(), "B) 4".into(), "C) 5".into(), "D) 6".into()],
    ///     "B) 4",
    /// )
    /// .unwrap();
    /// assert_eq!(q.correct_label(), 'B');
    /// ```
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
    ) -> Result<Self, QuizgenError> {
        let text = text.into();
        let correct_option = correct_option.into();

        if options.len() != OPTION_COUNT {
            return Err(QuizgenError::InvalidQuestion(format!(
                "expected {} options, found {}",
                OPTION_COUNT,
                options.len()
            )));
        }

        let mut seen = Vec::with_capacity(OPTION_COUNT);
        for option in &options {
            let label = option_label(option).ok_or_else(|| {
                QuizgenError::InvalidQuestion(format!("option {:?} has no A-D label", option))
            })?;
            if seen.contains(&label) {
                return Err(QuizgenError::InvalidQuestion(format!(
                    "duplicate option label {}",
                    label
                )));
            }
            seen.push(label);
        }

        if !options.contains(&correct_option) {
            return Err(QuizgenError::InvalidQuestion(format!(
                "correct option {:?} is not among the options",
                correct_option
            )));
        }

        Ok(Self {
            text,
            options,
            correct_option,
        })
    }

    /// Question text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in the order the model listed them
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The correct option string
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    /// Label of the correct option
    pub fn correct_label(&self) -> char {
        // Validated in `new`
        option_label(&self.correct_option).unwrap_or('?')
    }

    /// Look up an option by its label, case-insensitively
    pub fn option_for_label(&self, label: char) -> Option<&str> {
        let label = label.to_ascii_uppercase();
        self.options
            .iter()
            .find(|o| option_label(o) == Some(label))
            .map(String::as_str)
    }

    /// Whether `selected` is one of this question's options
    pub fn has_option(&self, selected: &str) -> bool {
        self.options.iter().any(|o| o == selected)
    }

    /// Whether `selected` is the correct option
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_option == selected
    }
}
