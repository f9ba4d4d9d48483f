//! In-process embedding via fastembed ONNX models
//!
//! The model is acquired once at construction and held for the life of
//! the provider; embedding never touches the network.

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use sema_config::EmbeddingConfig;
use sema_core::{Embedder, ProviderError, Result};
use tracing::info;

const PROVIDER: &str = "fastembed";

fn model_from_name(name: &str) -> Option<(EmbeddingModel, usize)> {
    match name {
        "bge-small-en-v1.5" => Some((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Some((EmbeddingModel::BGEBaseENV15, 768)),
        "bge-large-en-v1.5" => Some((EmbeddingModel::BGELargeENV15, 1024)),
        "all-minilm-l6-v2" => Some((EmbeddingModel::AllMiniLML6V2, 384)),
        "nomic-embed-text-v1.5" => Some((EmbeddingModel::NomicEmbedTextV15, 768)),
        _ => None,
    }
}

pub struct LocalEmbedder {
    model: TextEmbedding,
    dimension: usize,
}

impl LocalEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let (embedding_model, default_dim) =
            model_from_name(&config.model_name).ok_or_else(|| {
                ProviderError::invalid_input(format!(
                    "unknown local model '{}'; known: bge-small-en-v1.5, bge-base-en-v1.5, \
                     bge-large-en-v1.5, all-minilm-l6-v2, nomic-embed-text-v1.5",
                    config.model_name
                ))
            })?;

        // Global cache directory to avoid re-downloading models per project
        let cache_dir = std::env::var("FASTEMBED_CACHE_PATH")
            .ok()
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|home| format!("{}/.cache/fastembed", home))
            })
            .unwrap_or_else(|| ".fastembed_cache".to_string());

        info!(model = %config.model_name, "loading local embedding model");
        let model = TextEmbedding::try_new(
            InitOptions::new(embedding_model)
                .with_cache_dir(std::path::PathBuf::from(cache_dir))
                .with_show_download_progress(false),
        )
        .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        Ok(Self {
            model,
            dimension: config.dimension.unwrap_or(default_dim),
        })
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut list = self.embed_batch(&[text.to_string()]).await?;
        list.pop()
            .ok_or_else(|| ProviderError::invalid_response(PROVIDER, "empty embedding output"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        crate::reject_empty(texts)?;
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))
    }
}
