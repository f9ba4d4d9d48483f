mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{handle_recall, handle_relevance, handle_score, Cli, Commands};
use sema_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            candidate,
            reference,
        } => {
            handle_score(&config, &candidate, &reference).await?;
        }
        Commands::Relevance {
            question,
            answer,
            contexts,
        } => {
            handle_relevance(&config, &question, &answer, &contexts).await?;
        }
        Commands::Recall {
            question,
            ground_truth,
            contexts,
        } => {
            handle_recall(&config, &question, &ground_truth, &contexts).await?;
        }
    }

    Ok(())
}
