use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sema_config::Config;
use sema_embed::select_embedder;
use sema_llm::select_llm;
use sema_metrics::{AnswerRelevance, ContextRecall, SemanticSimilarity};

#[derive(Parser)]
#[command(name = "sema")]
#[command(about = "Score candidate answers with pluggable embedding providers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cosine similarity between a candidate and a reference text
    Score {
        candidate: String,
        reference: String,
    },
    /// Relevance of an answer to the original question
    Relevance {
        question: String,
        answer: String,
        #[arg(short = 'x', long = "context")]
        contexts: Vec<String>,
    },
    /// Fraction of the ground truth attributable to the retrieved context
    Recall {
        question: String,
        ground_truth: String,
        #[arg(short = 'x', long = "context")]
        contexts: Vec<String>,
    },
}

pub async fn handle_score(config: &Config, candidate: &str, reference: &str) -> Result<()> {
    let embedder = select_embedder(&config.embedding)?;
    let metric = SemanticSimilarity::new(embedder);
    let score = metric.score(candidate, reference).await?;
    println!("{:.4}", score);
    Ok(())
}

pub async fn handle_relevance(
    config: &Config,
    question: &str,
    answer: &str,
    contexts: &[String],
) -> Result<()> {
    let embedder = select_embedder(&config.embedding)?;
    let llm = select_llm(&config.llm)?;
    let metric = AnswerRelevance::new(embedder, llm, config.metrics.strictness);
    let score = metric.score(question, answer, contexts).await?;
    println!("{:.4}", score);
    Ok(())
}

pub async fn handle_recall(
    config: &Config,
    question: &str,
    ground_truth: &str,
    contexts: &[String],
) -> Result<()> {
    let llm = select_llm(&config.llm)?;
    let metric = ContextRecall::new(llm);
    let score = metric.score(question, contexts, ground_truth).await?;
    println!("{:.4}", score);
    Ok(())
}
