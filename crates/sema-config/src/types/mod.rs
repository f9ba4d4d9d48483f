pub mod embedding;
pub mod llm;
pub mod metrics;

pub use embedding::{EmbeddingBackend, EmbeddingConfig, RetryConfig};
pub use llm::{LlmBackend, LlmConfig};
pub use metrics::MetricsConfig;
