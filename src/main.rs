//! quizgen - Multiple-choice quizzes from documents
//!
#![doc = "quizgen - Multiple-choice quizzes from documents"]
#![doc = "Main entry point for the quizgen application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quizgen::cli::{Cli, Commands};
use quizgen::commands;
use quizgen::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Execute command. Only generation needs provider configuration.
    match &cli.command {
        Commands::Generate {
            document, output, ..
        } => {
            let config = load_config(&cli)?;
            tracing::info!("Starting quiz generation");
            commands::generate::run_generate(config, document, output.as_deref()).await?;
            Ok(())
        }
        Commands::Quiz {
            document, review, ..
        } => {
            let config = load_config(&cli)?;
            tracing::info!("Starting interactive quiz");
            commands::quiz::run_quiz(config, document, *review).await?;
            Ok(())
        }
        Commands::Take { quiz, review } => {
            tracing::info!("Loading quiz from: {}", quiz.display());
            commands::quiz::run_take(quiz, *review)?;
            Ok(())
        }
        Commands::Parse { reply, json } => commands::parse::run_parse(reply, *json),
    }
}

/// Load configuration from file, environment and CLI, then validate it
fn load_config(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, cli)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so that `generate` can write JSON to stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "quizgen=debug" } else { "quizgen=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
