//! Quiz session controller
//!
//! A [`QuizSession`] owns the questions of one quiz, the user's selections
//! and the timing/score of the attempt. It moves through three states:
//!
//! ```text
//! Empty --start--> Active --submit--> Finalized
//!   ^                 ^                   |
//!   |                 +------start--------+
//! ```
//!
//! Answers may be recorded while Active or Finalized; re-answering after a
//! submission does not resubmit.
//!
//! # Examples
//!
//! ```
//! use quizgen::quiz::{Question, QuizSession};
//!
//! let q = Question::new(
//!     "What is 2+2?",
//!     vec!["A) 3".into(), "B) 4".into(), "C) 5".into(), "D) 6".into()],
//!     "B) 4",
//! )
//! .unwrap();
//!
//! let mut session = QuizSession::new();
//! session.start(vec![q]);
//! session.record_answer(0, "B) 4").unwrap();
//! session.submit().unwrap();
//! assert_eq!(session.score(), 1);
//! assert_eq!(session.percentage().unwrap(), 100.0);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::QuizgenError;
use crate::quiz::Question;

/// Lifecycle state of a [`QuizSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No quiz loaded
    Empty,
    /// Quiz started, accepting answers
    Active,
    /// Submitted at least once
    Finalized,
}

/// Score and timing of a submitted quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    /// Number of correctly answered questions
    pub score: usize,
    /// Number of questions in the quiz
    pub total: usize,
    /// `score / total * 100`
    pub percentage: f64,
    /// Seconds between start and the latest submission
    pub elapsed_seconds: f64,
    /// `elapsed_seconds / total`
    pub average_seconds_per_question: f64,
}

/// One row of the post-quiz answer review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerReview<'a> {
    /// Zero-based question index
    pub index: usize,
    /// The question
    pub question: &'a Question,
    /// What the user picked, if anything
    pub selected: Option<&'a str>,
    /// The correct option
    pub correct_option: &'a str,
    /// Whether `selected` equals `correct_option`
    pub is_correct: bool,
}

/// In-memory state of a single quiz attempt
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: BTreeMap<usize, String>,
    start_time: Option<DateTime<Utc>>,
    score: usize,
    elapsed_seconds: f64,
    state: SessionState,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            answers: BTreeMap::new(),
            start_time: None,
            score: 0,
            elapsed_seconds: 0.0,
            state: SessionState::Empty,
        }
    }

    /// Replace any existing quiz with `questions` and start the clock now
    pub fn start(&mut self, questions: Vec<Question>) {
        self.start_at(questions, Utc::now());
    }

    /// Like [`start`](Self::start) with an explicit start time
    pub fn start_at(&mut self, questions: Vec<Question>, now: DateTime<Utc>) {
        tracing::debug!("Starting quiz session with {} questions", questions.len());
        self.questions = questions;
        self.answers.clear();
        self.start_time = Some(now);
        self.score = 0;
        self.elapsed_seconds = 0.0;
        self.state = SessionState::Active;
    }

    /// Store or overwrite the selection for question `index`
    ///
    /// # Errors
    ///
    /// - `SessionNotStarted` if no quiz has been started
    /// - `QuestionIndexOutOfRange` if `index` is past the last question
    /// - `InvalidAnswer` if `selected` is not one of the question's options
    pub fn record_answer(
        &mut self,
        index: usize,
        selected: impl Into<String>,
    ) -> Result<(), QuizgenError> {
        if self.state == SessionState::Empty {
            return Err(QuizgenError::SessionNotStarted);
        }

        let selected = selected.into();
        let question = self
            .questions
            .get(index)
            .ok_or(QuizgenError::QuestionIndexOutOfRange {
                index,
                len: self.questions.len(),
            })?;

        if !question.has_option(&selected) {
            return Err(QuizgenError::InvalidAnswer { index, selected });
        }

        self.answers.insert(index, selected);
        Ok(())
    }

    /// Score the current answers and stop the clock now
    ///
    /// Calling this again recomputes from the answers as they are.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotStarted` before [`start`](Self::start), and
    /// `DivisionUndefined` when the session holds no questions. Neither
    /// case changes the session.
    pub fn submit(&mut self) -> Result<QuizSummary, QuizgenError> {
        self.submit_at(Utc::now())
    }

    /// Like [`submit`](Self::submit) with an explicit submission time
    pub fn submit_at(&mut self, now: DateTime<Utc>) -> Result<QuizSummary, QuizgenError> {
        let start_time = self.start_time.ok_or(QuizgenError::SessionNotStarted)?;
        if self.questions.is_empty() {
            return Err(QuizgenError::DivisionUndefined);
        }

        self.score = self
            .answers
            .iter()
            .filter(|(index, selected)| {
                self.questions
                    .get(**index)
                    .is_some_and(|q| q.is_correct(selected))
            })
            .count();

        let elapsed = now.signed_duration_since(start_time);
        self.elapsed_seconds = elapsed.num_milliseconds().max(0) as f64 / 1000.0;
        self.state = SessionState::Finalized;

        tracing::info!(
            score = self.score,
            total = self.questions.len(),
            elapsed_seconds = self.elapsed_seconds,
            "Quiz submitted"
        );

        self.summary()
    }

    /// Score as a percentage of the number of questions
    ///
    /// # Errors
    ///
    /// Returns `DivisionUndefined` when the session holds no questions.
    pub fn percentage(&self) -> Result<f64, QuizgenError> {
        if self.questions.is_empty() {
            return Err(QuizgenError::DivisionUndefined);
        }
        Ok(self.score as f64 / self.questions.len() as f64 * 100.0)
    }

    /// Elapsed time divided by the number of questions
    pub fn average_seconds_per_question(&self) -> Result<f64, QuizgenError> {
        if self.questions.is_empty() {
            return Err(QuizgenError::DivisionUndefined);
        }
        Ok(self.elapsed_seconds / self.questions.len() as f64)
    }

    /// Score and timing of the latest submission
    pub fn summary(&self) -> Result<QuizSummary, QuizgenError> {
        Ok(QuizSummary {
            score: self.score,
            total: self.questions.len(),
            percentage: self.percentage()?,
            elapsed_seconds: self.elapsed_seconds,
            average_seconds_per_question: self.average_seconds_per_question()?,
        })
    }

    /// Per-question comparison of the user's selections with the key
    pub fn review(&self) -> Vec<AnswerReview<'_>> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = self.answers.get(&index).map(String::as_str);
                AnswerReview {
                    index,
                    question,
                    selected,
                    correct_option: question.correct_option(),
                    is_correct: selected.is_some_and(|s| question.is_correct(s)),
                }
            })
            .collect()
    }

    /// Questions in quiz order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Selection recorded for question `index`
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Number of questions answered so far
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Score computed by the latest submission
    pub fn score(&self) -> usize {
        self.score
    }

    /// Seconds elapsed at the latest submission
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// When the current quiz was started
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }
}
