/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `generate` — Generate questions from a document and write them as JSON
- `quiz`     — Interactive quiz taking, scoring and review
- `parse`    — Run the reply parser over a saved reply
*/

use crate::config::Config;
use crate::error::{QuizgenError, Result};
use crate::pipeline::{PipelineOutcome, QuizPipeline};
use crate::quiz::Question;
use std::path::Path;

// Interactive quiz taking
pub mod quiz;

/// Run the full pipeline over a document, reporting diagnostics on stderr
pub async fn generate_questions(config: &Config, document: &Path) -> Result<PipelineOutcome> {
    use colored::Colorize;

    let pipeline = QuizPipeline::from_config(config)?;

    eprintln!(
        "{} {} with {} ({}, {} questions per chunk)",
        "Generating quiz from".cyan(),
        document.display(),
        config.provider.active_model().bold(),
        config.generation.difficulty,
        config.generation.num_questions
    );

    let outcome = pipeline.run_path(document).await?;

    if !outcome.failures.is_empty() {
        eprintln!(
            "{}",
            format!(
                "{} of {} chunks failed to generate",
                outcome.failures.len(),
                outcome.chunk_count
            )
            .yellow()
        );
    }
    if !outcome.skipped.is_empty() {
        eprintln!(
            "{}",
            format!("Skipped {} malformed questions", outcome.skipped.len()).yellow()
        );
    }
    eprintln!(
        "{}",
        format!("Generated {} questions", outcome.questions.len()).green()
    );

    Ok(outcome)
}

/// Write questions as pretty-printed JSON
pub fn questions_to_json(questions: &[Question]) -> Result<String> {
    serde_json::to_string_pretty(questions)
        .map_err(|e| QuizgenError::Serialization(e).into())
}

// Generate command handler
pub mod generate {
    //! Non-interactive generation: document in, quiz JSON out.

    use super::*;

    /// Generate a quiz and write it to `output` or stdout
    pub async fn run_generate(config: Config, document: &Path, output: Option<&Path>) -> Result<()> {
        let outcome = generate_questions(&config, document).await?;
        let json = questions_to_json(&outcome.questions)?;

        match output {
            Some(path) => {
                std::fs::write(path, json + "\n")?;
                tracing::info!("Wrote quiz to {}", path.display());
                eprintln!("Quiz written to {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}

// Parse command handler
pub mod parse {
    //! Offline parsing of a saved model reply.

    use super::*;
    use crate::parser::{parse_reply, ParseOutcome};

    /// Parse a saved reply and print the outcome
    pub fn run_parse(reply_path: &Path, json: bool) -> Result<()> {
        let reply = std::fs::read_to_string(reply_path).map_err(|e| {
            QuizgenError::Config(format!("Failed to read {}: {}", reply_path.display(), e))
        })?;

        let outcome = parse_reply(&reply);

        if json {
            let text = serde_json::to_string_pretty(&outcome).map_err(QuizgenError::Serialization)?;
            println!("{}", text);
        } else {
            print!("{}", format_outcome(&outcome));
        }

        Ok(())
    }

    /// Human-readable rendering of a parse outcome
    pub fn format_outcome(outcome: &ParseOutcome) -> String {
        let mut out = format!(
            "Accepted {} questions, skipped {}\n",
            outcome.questions.len(),
            outcome.skipped.len()
        );

        for (i, question) in outcome.questions.iter().enumerate() {
            out.push_str(&format!("\n{}. {}\n", i + 1, question.text()));
            for option in question.options() {
                let marker = if question.is_correct(option) { "*" } else { " " };
                out.push_str(&format!("  {} {}\n", marker, option));
            }
        }

        if !outcome.skipped.is_empty() {
            out.push('\n');
            for skip in &outcome.skipped {
                out.push_str(&format!("{}\n", skip));
            }
        }

        out
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_file, sample_question, temp_dir, SAMPLE_REPLY};

    #[test]
    fn test_questions_to_json_round_trips() {
        let question = sample_question();
        let json = questions_to_json(std::slice::from_ref(&question)).unwrap();
        let back: Vec<Question> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![question]);
    }

    #[tokio::test]
    async fn test_generate_unknown_provider_fails() {
        let mut config = Config::default();
        config.provider.provider_type = "invalid".to_string();
        let result = generate_questions(&config, Path::new("doc.txt")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_command_on_saved_reply() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "reply.txt", SAMPLE_REPLY);
        assert!(parse::run_parse(&path, false).is_ok());
    }
}
