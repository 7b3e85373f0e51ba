//! Command-line interface definition for quizgen
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to generate, take and inspect quizzes.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::generator::Difficulty;

/// quizgen - Multiple-choice quizzes from documents
///
/// Extracts text from a document, asks an LLM for questions chunk by
/// chunk, and runs the result as an interactive quiz.
#[derive(Parser, Debug, Clone)]
#[command(name = "quizgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for quizgen
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate questions from a document and write them as JSON
    Generate {
        /// Document to read (PDF or UTF-8 text)
        document: PathBuf,

        #[command(flatten)]
        generation: GenerationArgs,

        /// Write the quiz to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate questions from a document and take the quiz right away
    Quiz {
        /// Document to read (PDF or UTF-8 text)
        document: PathBuf,

        #[command(flatten)]
        generation: GenerationArgs,

        /// Show the answer review table after scoring
        #[arg(short, long)]
        review: bool,
    },

    /// Take a quiz previously written by `generate`
    Take {
        /// Quiz JSON file
        quiz: PathBuf,

        /// Show the answer review table after scoring
        #[arg(short, long)]
        review: bool,
    },

    /// Parse a saved model reply and report accepted and skipped questions
    Parse {
        /// File containing the raw reply text
        reply: PathBuf,

        /// Print the parse result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Generation overrides shared by `generate` and `quiz`
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GenerationArgs {
    /// Override the provider from config (openai, ollama)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Override the model of the selected provider
    #[arg(short, long)]
    pub model: Option<String>,

    /// Questions requested per chunk
    #[arg(short = 'n', long)]
    pub questions: Option<usize>,

    /// Difficulty: easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Maximum characters per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Generation requests allowed in flight at once
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Generation overrides, for commands that generate
    pub fn generation_args(&self) -> Option<&GenerationArgs> {
        match &self.command {
            Commands::Generate { generation, .. } | Commands::Quiz { generation, .. } => {
                Some(generation)
            }
            Commands::Take { .. } | Commands::Parse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["quizgen", "generate", "notes.pdf"]).unwrap();
        if let Commands::Generate {
            document,
            generation,
            output,
        } = cli.command
        {
            assert_eq!(document, PathBuf::from("notes.pdf"));
            assert_eq!(generation, GenerationArgs::default());
            assert_eq!(output, None);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_with_overrides() {
        let cli = Cli::try_parse_from([
            "quizgen",
            "generate",
            "notes.pdf",
            "-n",
            "3",
            "--difficulty",
            "Easy",
            "--provider",
            "ollama",
            "--chunk-size",
            "800",
            "--max-concurrent",
            "2",
            "-o",
            "quiz.json",
        ])
        .unwrap();

        let args = cli.generation_args().unwrap();
        assert_eq!(args.questions, Some(3));
        assert_eq!(args.difficulty, Some(Difficulty::Easy));
        assert_eq!(args.provider.as_deref(), Some("ollama"));
        assert_eq!(args.chunk_size, Some(800));
        assert_eq!(args.max_concurrent, Some(2));

        if let Commands::Generate { output, .. } = cli.command {
            assert_eq!(output, Some(PathBuf::from("quiz.json")));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_invalid_difficulty() {
        let cli = Cli::try_parse_from(["quizgen", "quiz", "notes.pdf", "--difficulty", "brutal"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_quiz_with_review() {
        let cli = Cli::try_parse_from(["quizgen", "quiz", "notes.txt", "--review"]).unwrap();
        assert!(matches!(cli.command, Commands::Quiz { review: true, .. }));
        assert!(cli.generation_args().is_some());
    }

    #[test]
    fn test_cli_parse_take() {
        let cli = Cli::try_parse_from(["quizgen", "take", "quiz.json"]).unwrap();
        if let Commands::Take { quiz, review } = &cli.command {
            assert_eq!(quiz, &PathBuf::from("quiz.json"));
            assert!(!review);
        } else {
            panic!("Expected Take command");
        }
        assert!(cli.generation_args().is_none());
    }

    #[test]
    fn test_cli_parse_parse_json() {
        let cli = Cli::try_parse_from(["quizgen", "parse", "reply.txt", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Parse { json: true, .. }));
    }

    #[test]
    fn test_cli_parse_with_config_and_verbose() {
        let cli =
            Cli::try_parse_from(["quizgen", "--config", "custom.yaml", "-v", "parse", "r.txt"])
                .unwrap();
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_default_config_path() {
        let cli = Cli::try_parse_from(["quizgen", "parse", "r.txt"]).unwrap();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_missing_command() {
        assert!(Cli::try_parse_from(["quizgen"]).is_err());
    }

    #[test]
    fn test_cli_parse_missing_document() {
        assert!(Cli::try_parse_from(["quizgen", "generate"]).is_err());
    }
}
