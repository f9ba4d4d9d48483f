//! Embedding provider adapters: hosted OpenAI-compatible API, local
//! fastembed ONNX models and a local Ollama server, all behind the
//! `sema_core::Embedder` trait.

pub mod local;
pub mod ollama;
pub mod openai;

use std::sync::Arc;

use sema_config::{EmbeddingBackend, EmbeddingConfig};
use sema_core::{Embedder, ProviderError, Result};

pub use local::LocalEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;

/// Construct the embedding provider named by the configuration. The
/// backend is fixed at construction time; consumers only ever see
/// `Arc<dyn Embedder>`, so vectors compared by a metric always come
/// from the one provider it was built with.
pub fn select_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    match config.backend {
        EmbeddingBackend::External => Ok(Arc::new(OpenAiEmbedder::new(config)?)),
        EmbeddingBackend::Local => Ok(Arc::new(LocalEmbedder::new(config)?)),
        EmbeddingBackend::Ollama => Ok(Arc::new(OllamaEmbedder::new(config)?)),
    }
}

/// All adapters reject empty text before touching the backend.
pub(crate) fn reject_empty(texts: &[String]) -> Result<()> {
    for text in texts {
        if text.trim().is_empty() {
            return Err(ProviderError::invalid_input("cannot embed empty text"));
        }
    }
    Ok(())
}
