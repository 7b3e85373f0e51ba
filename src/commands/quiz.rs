//! Interactive quiz taking
//!
//! Presents each question on the terminal, reads answers with `rustyline`,
//! then prints the score, timing and an optional review table.

use crate::commands::generate_questions;
use crate::config::Config;
use crate::error::{QuizgenError, Result};
use crate::quiz::{AnswerReview, Question, QuizSession, QuizSummary, OPTION_COUNT};
use colored::Colorize;
use prettytable::{format, row, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;

/// Generate a quiz from a document and take it right away
pub async fn run_quiz(config: Config, document: &Path, review: bool) -> Result<()> {
    let outcome = generate_questions(&config, document).await?;
    take_quiz(outcome.questions, review)
}

/// Take a quiz stored as JSON by `generate`
pub fn run_take(quiz_path: &Path, review: bool) -> Result<()> {
    let questions = load_quiz(quiz_path)?;
    take_quiz(questions, review)
}

/// Load questions from a quiz JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, a record fails validation,
/// or the quiz has no questions.
pub fn load_quiz(path: &Path) -> Result<Vec<Question>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        QuizgenError::Config(format!("Failed to read quiz {}: {}", path.display(), e))
    })?;
    let questions: Vec<Question> =
        serde_json::from_str(&contents).map_err(QuizgenError::Serialization)?;

    if questions.is_empty() {
        return Err(QuizgenError::NoQuestions.into());
    }

    tracing::info!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Run the answer loop, then score and report
fn take_quiz(questions: Vec<Question>, review: bool) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = QuizSession::new();
    session.start(questions);

    let total = session.questions().len();
    println!(
        "\n{} {} questions. Answer with A-D or 1-{}, Enter to skip.\n",
        "Quiz:".bold(),
        total,
        OPTION_COUNT
    );

    'questions: for index in 0..total {
        let question = session.questions()[index].clone();
        println!("{}", format_question(index, &question));

        loop {
            match rl.readline("Your answer: ") {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        break;
                    }
                    match resolve_choice(&question, input) {
                        Some(option) => {
                            session.record_answer(index, option)?;
                            break;
                        }
                        None => {
                            println!("{}", format!("Please answer A-D or 1-{}", OPTION_COUNT).yellow());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Submitting early".yellow());
                    break 'questions;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break 'questions;
                }
            }
        }
        println!();
    }

    let summary = session.submit()?;
    print_summary(&summary);

    if review {
        print_review(&session.review());
    }

    Ok(())
}

/// Map user input to one of the question's options
///
/// Accepts a letter `A`-`D` (either case, with or without a trailing `)`)
/// or a number `1`-`4`.
///
/// # Examples
///
/// ```
/// use quizgen::commands::quiz::resolve_choice;
/// use quizgen::quiz::Question;
///
/// let q = Question::new(
///     "What is 2+2?",
///     vec!["A) 3".into(), "B) 4".into(), "C) 5".into(), "D) 6".into()],
///     "B) 4",
/// )
/// .unwrap();
/// assert_eq!(resolve_choice(&q, "b"), Some("B) 4"));
/// assert_eq!(resolve_choice(&q, "4"), Some("D) 6"));
/// assert_eq!(resolve_choice(&q, "E"), None);
/// ```
pub fn resolve_choice<'q>(question: &'q Question, input: &str) -> Option<&'q str> {
    let input = input.trim();
    let token = input.strip_suffix(')').unwrap_or(input);

    let mut chars = token.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if let Some(n) = first.to_digit(10) {
        let n = n as usize;
        if (1..=OPTION_COUNT).contains(&n) {
            return question.options().get(n - 1).map(String::as_str);
        }
        return None;
    }

    question.option_for_label(first)
}

/// Render a question and its options for the terminal
fn format_question(index: usize, question: &Question) -> String {
    let mut out = format!("{} {}\n", format!("Q{}.", index + 1).cyan().bold(), question.text());
    for option in question.options() {
        out.push_str(&format!("   {}\n", option));
    }
    out
}

/// Print score and timing
fn print_summary(summary: &QuizSummary) {
    let percentage = format!("{:.1}%", summary.percentage);
    let percentage = if summary.percentage >= 50.0 {
        percentage.green()
    } else {
        percentage.red()
    };

    println!("{}", "Results".bold().underline());
    println!("Score:           {}/{}", summary.score, summary.total);
    println!("Percentage:      {}", percentage);
    println!("Total time:      {:.1}s", summary.elapsed_seconds);
    println!(
        "Time / question: {:.1}s\n",
        summary.average_seconds_per_question
    );
}

/// Print the per-question answer review
fn print_review(rows: &[AnswerReview<'_>]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "#".bold(),
        "Question".bold(),
        "Your answer".bold(),
        "Correct answer".bold(),
        "".bold()
    ]);

    for review in rows {
        let verdict = if review.is_correct {
            "correct".green()
        } else {
            "wrong".red()
        };
        table.add_row(row![
            review.index + 1,
            truncate(review.question.text(), 48),
            review.selected.unwrap_or("-"),
            review.correct_option,
            verdict
        ]);
    }

    println!("Answer review:");
    table.printstd();
    println!();
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Question {
        Question::new(
            "Capital of France?",
            vec![
                "A) Berlin".into(),
                "B) Madrid".into(),
                "C) Paris".into(),
                "D) Rome".into(),
            ],
            "C) Paris",
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_choice_letters() {
        let q = sample();
        assert_eq!(resolve_choice(&q, "C"), Some("C) Paris"));
        assert_eq!(resolve_choice(&q, "c"), Some("C) Paris"));
        assert_eq!(resolve_choice(&q, " a) "), Some("A) Berlin"));
    }

    #[test]
    fn test_resolve_choice_numbers() {
        let q = sample();
        assert_eq!(resolve_choice(&q, "1"), Some("A) Berlin"));
        assert_eq!(resolve_choice(&q, "3"), Some("C) Paris"));
        assert_eq!(resolve_choice(&q, "0"), None);
        assert_eq!(resolve_choice(&q, "5"), None);
    }

    #[test]
    fn test_resolve_choice_rejects_other_input() {
        let q = sample();
        assert_eq!(resolve_choice(&q, "E"), None);
        assert_eq!(resolve_choice(&q, "Paris"), None);
        assert_eq!(resolve_choice(&q, "12"), None);
        assert_eq!(resolve_choice(&q, ""), None);
    }

    #[test]
    fn test_format_question_lists_options() {
        let text = format_question(0, &sample());
        assert!(text.contains("Capital of France?"));
        assert!(text.contains("   D) Rome"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_load_quiz_rejects_invalid_record() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text":"Q","options":["A) 1","B) 2","C) 3"],"correct_option":"A) 1"}}]"#
        )
        .unwrap();
        assert!(load_quiz(file.path()).is_err());
    }

    #[test]
    fn test_load_quiz_rejects_empty_quiz() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let err = load_quiz(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuizgenError>(),
            Some(QuizgenError::NoQuestions)
        ));
    }

    #[test]
    fn test_load_quiz_reads_questions() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![sample()]).unwrap();
        write!(file, "{}", json).unwrap();
        let questions = load_quiz(file.path()).unwrap();
        assert_eq!(questions, vec![sample()]);
    }
}
