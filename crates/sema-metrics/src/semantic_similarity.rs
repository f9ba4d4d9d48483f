//! Cosine similarity between a candidate and a reference text

use std::sync::Arc;

use sema_core::{cosine, Embedder, ProviderError, Result};

/// Scores a candidate answer against a reference by embedding both
/// with the one injected provider and taking their cosine similarity.
/// Result is clamped to [0, 1].
///
/// Both vectors come from the same provider by construction; the
/// length check stays as a defensive guard.
pub struct SemanticSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl SemanticSimilarity {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub async fn score(&self, candidate: &str, reference: &str) -> Result<f32> {
        let vectors = self
            .embedder
            .embed_batch(&[candidate.to_string(), reference.to_string()])
            .await?;

        if vectors.len() != 2 {
            return Err(ProviderError::invalid_response(
                "embedder",
                format!("got {} vectors for 2 inputs", vectors.len()),
            ));
        }

        let similarity = cosine(&vectors[0], &vectors[1])?;
        Ok(similarity.clamp(0.0, 1.0))
    }
}
