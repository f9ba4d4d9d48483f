//! Hosted OpenAI-compatible embedding adapter
//!
//! Also covers Azure-style deployments: point `endpoint` at the
//! deployment root and set `api_version`, which switches auth to the
//! `api-key` header. Transient failures (connect errors, timeouts,
//! 429, 5xx) are retried with bounded exponential backoff; anything
//! else surfaces immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sema_config::{EmbeddingConfig, RetryConfig};
use sema_core::{Embedder, ProviderError, Result};
use tracing::{debug, warn};

const PROVIDER: &str = "openai";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

fn known_dimension(model: &str) -> Option<usize> {
    match model {
        "text-embedding-3-small" => Some(1536),
        "text-embedding-3-large" => Some(3072),
        "text-embedding-ada-002" => Some(1536),
        _ => None,
    }
}

#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    api_url: String,
    api_version: Option<String>,
    dimension: usize,
    retry: RetryConfig,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

enum Attempt {
    Transient(String),
    Fatal(ProviderError),
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ProviderError::invalid_input(
                    "no API key: set embedding.api_key or OPENAI_API_KEY",
                )
            })?;

        let dimension = config
            .dimension
            .or_else(|| known_dimension(&config.model_name))
            .ok_or_else(|| {
                ProviderError::invalid_input(format!(
                    "unknown embedding model '{}': set embedding.dimension",
                    config.model_name
                ))
            })?;

        let base = config.endpoint.as_deref().unwrap_or(DEFAULT_API_BASE);
        let api_url = format!("{}/embeddings", base.trim_end_matches('/'));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.retry.timeout_secs))
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        Ok(Self {
            client,
            api_key,
            model: config.model_name.clone(),
            api_url,
            api_version: config.api_version.clone(),
            dimension,
            retry: config.retry.clone(),
        })
    }

    async fn attempt(&self, texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, Attempt> {
        let mut req = self.client.post(&self.api_url);
        req = match &self.api_version {
            // Azure deployments authenticate with the api-key header
            Some(version) => req
                .query(&[("api-version", version.as_str())])
                .header("api-key", &self.api_key),
            None => req.bearer_auth(&self.api_key),
        };

        let resp = req
            .json(&serde_json::json!({
                "model": self.model,
                "input": texts,
            }))
            .send()
            .await
            .map_err(|e| Attempt::Transient(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Attempt::Transient(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Attempt::Fatal(ProviderError::invalid_input(format!(
                "embedding request rejected ({}): {}",
                status, body
            ))));
        }

        let parsed: EmbeddingResponse = resp
            .json()
            .await
            .map_err(|e| Attempt::Fatal(ProviderError::invalid_response(PROVIDER, e)))?;

        if parsed.data.len() != texts.len() {
            return Err(Attempt::Fatal(ProviderError::invalid_response(
                PROVIDER,
                format!(
                    "got {} embeddings for {} inputs",
                    parsed.data.len(),
                    texts.len()
                ),
            )));
        }

        let embeddings: Vec<Vec<f32>> = parsed.data.into_iter().map(|d| d.embedding).collect();
        for embedding in &embeddings {
            if embedding.len() != self.dimension {
                return Err(Attempt::Fatal(ProviderError::invalid_response(
                    PROVIDER,
                    format!(
                        "expected {}-dim vector, got {}",
                        self.dimension,
                        embedding.len()
                    ),
                )));
            }
        }

        Ok(embeddings)
    }

    async fn request_with_retry(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut backoff = Duration::from_millis(self.retry.initial_backoff_ms);
        let max_backoff = Duration::from_millis(self.retry.max_backoff_ms);
        let mut last_reason = String::new();

        for attempt in 0..=self.retry.max_retries {
            match self.attempt(texts).await {
                Ok(embeddings) => {
                    debug!(count = embeddings.len(), "embedded batch");
                    return Ok(embeddings);
                }
                Err(Attempt::Fatal(err)) => return Err(err),
                Err(Attempt::Transient(reason)) => {
                    last_reason = reason;
                    if attempt < self.retry.max_retries {
                        warn!(
                            "transient embedding failure (attempt {}/{}): {}",
                            attempt + 1,
                            self.retry.max_retries + 1,
                            last_reason
                        );
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(max_backoff);
                    }
                }
            }
        }

        Err(ProviderError::unavailable(
            PROVIDER,
            format!(
                "{} attempts failed, last error: {}",
                self.retry.max_retries + 1,
                last_reason
            ),
        ))
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut list = self.embed_batch(&[text.to_string()]).await?;
        list.pop()
            .ok_or_else(|| ProviderError::invalid_response(PROVIDER, "empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        crate::reject_empty(texts)?;
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_with_retry(texts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(model: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            model_name: model.to_string(),
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_known_model_dimensions() {
        assert_eq!(known_dimension("text-embedding-3-small"), Some(1536));
        assert_eq!(known_dimension("text-embedding-3-large"), Some(3072));
        assert_eq!(known_dimension("bge-small-en-v1.5"), None);
    }

    #[test]
    fn test_unknown_model_without_dimension_rejected() {
        let err = OpenAiEmbedder::new(&config_with("my-finetune")).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidInput { .. }));
    }

    #[test]
    fn test_unknown_model_with_dimension_accepted() {
        let mut config = config_with("my-finetune");
        config.dimension = Some(1024);
        let embedder = OpenAiEmbedder::new(&config).unwrap();
        assert_eq!(embedder.dimension(), 1024);
    }

    #[test]
    fn test_endpoint_override_builds_url() {
        let mut config = config_with("text-embedding-3-small");
        config.endpoint = Some("https://myres.openai.azure.com/openai/deployments/embed/".to_string());
        let embedder = OpenAiEmbedder::new(&config).unwrap();
        assert_eq!(
            embedder.api_url,
            "https://myres.openai.azure.com/openai/deployments/embed/embeddings"
        );
    }
}
