//! LLM chat clients behind the `sema_core::Llm` trait: a hosted
//! OpenAI-compatible provider and a local Ollama provider.

pub mod ollama;
pub mod openai;

use std::sync::Arc;

use sema_config::{LlmBackend, LlmConfig};
use sema_core::{Llm, Result};

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Construct the LLM client named by the configuration.
pub fn select_llm(config: &LlmConfig) -> Result<Arc<dyn Llm>> {
    match config.backend {
        LlmBackend::OpenAi => Ok(Arc::new(OpenAiProvider::new(config)?)),
        LlmBackend::Ollama => Ok(Arc::new(OllamaProvider::new(config)?)),
    }
}
