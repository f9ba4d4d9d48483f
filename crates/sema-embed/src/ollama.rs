//! Local Ollama server adapter
//!
//! Ollama embeds one prompt per request, so batches loop over the
//! inputs; output order always matches input order.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sema_config::EmbeddingConfig;
use sema_core::{Embedder, ProviderError, Result};

const PROVIDER: &str = "ollama";
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

fn known_dimension(model: &str) -> Option<usize> {
    // Strip a ":latest"-style tag before the lookup
    match model.split(':').next().unwrap_or(model) {
        "nomic-embed-text" => Some(768),
        "mxbai-embed-large" => Some(1024),
        "all-minilm" => Some(384),
        "snowflake-arctic-embed" => Some(1024),
        _ => None,
    }
}

pub struct OllamaEmbedder {
    client: Client,
    model: String,
    base_url: String,
    dimension: usize,
}

impl OllamaEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let base_url = config
            .endpoint
            .clone()
            .or_else(|| std::env::var("OLLAMA_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let dimension = config
            .dimension
            .or_else(|| known_dimension(&config.model_name))
            .ok_or_else(|| {
                ProviderError::invalid_input(format!(
                    "unknown Ollama model '{}': set embedding.dimension",
                    config.model_name
                ))
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.retry.timeout_secs))
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        Ok(Self {
            client,
            model: config.model_name.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            dimension,
        })
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let resp = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": text,
            }))
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status.is_client_error() && status.as_u16() != 429 {
                return Err(ProviderError::invalid_input(format!(
                    "Ollama rejected input ({}): {}",
                    status, body
                )));
            }
            return Err(ProviderError::unavailable(
                PROVIDER,
                format!("{}: {}", status, body),
            ));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e))?;

        let embedding: Vec<f32> = json
            .get("embedding")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::invalid_response(PROVIDER, "no embedding field in response")
            })?
            .iter()
            .filter_map(|v| v.as_f64())
            .map(|f| f as f32)
            .collect();

        if embedding.len() != self.dimension {
            return Err(ProviderError::invalid_response(
                PROVIDER,
                format!(
                    "expected {}-dim vector, got {}",
                    self.dimension,
                    embedding.len()
                ),
            ));
        }

        Ok(embedding)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(ProviderError::invalid_input("cannot embed empty text"));
        }
        self.embed_one(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        crate::reject_empty(texts)?;
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_one(text).await?);
        }
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_model_dimension() {
        assert_eq!(known_dimension("nomic-embed-text:latest"), Some(768));
        assert_eq!(known_dimension("mxbai-embed-large"), Some(1024));
        assert_eq!(known_dimension("custom-model"), None);
    }

    #[test]
    fn test_unknown_model_requires_dimension() {
        let config = EmbeddingConfig {
            model_name: "custom-model".to_string(),
            ..Default::default()
        };
        assert!(OllamaEmbedder::new(&config).is_err());

        let config = EmbeddingConfig {
            model_name: "custom-model".to_string(),
            dimension: Some(512),
            ..Default::default()
        };
        assert_eq!(OllamaEmbedder::new(&config).unwrap().dimension(), 512);
    }
}
