use async_trait::async_trait;

use crate::error::Result;

/// Capability contract for embedding backends. Implementations are
/// constructed once, shared via `Arc`, and safe for concurrent reuse.
///
/// Empty input text is rejected with `InvalidInput` by every adapter,
/// before any network or model call.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Fixed dimensionality of every vector this provider produces.
    fn dimension(&self) -> usize;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts. Output order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Chat-completion contract for the LLM side of a metric.
#[async_trait]
pub trait Llm: Send + Sync {
    /// One completion for the prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// `n` independent completions for the same prompt, in request
    /// order. Backends that support multi-sampling natively override
    /// this; the default just loops.
    async fn generate(&self, prompt: &str, n: usize) -> Result<Vec<String>> {
        let mut outputs = Vec::with_capacity(n);
        for _ in 0..n {
            outputs.push(self.complete(prompt).await?);
        }
        Ok(outputs)
    }
}
