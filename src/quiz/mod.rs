//! Quiz domain types
//!
//! [`Question`] records produced by the reply parser and the
//! [`QuizSession`] controller that scores an attempt.

pub mod question;
pub mod session;

pub use question::{option_label, Question, OPTION_COUNT, OPTION_LABELS};
pub use session::{AnswerReview, QuizSession, QuizSummary, SessionState};
