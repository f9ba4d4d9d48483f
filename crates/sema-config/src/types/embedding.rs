//! Embedding provider configuration

use serde::{Deserialize, Serialize};

/// Embedding provider configuration
///
/// Read-only after construction; owned by the adapter it configures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding backend to use
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Model name for the selected backend
    ///
    /// Examples:
    /// - OpenAI: "text-embedding-3-small", "text-embedding-3-large"
    /// - Local: "bge-small-en-v1.5", "all-minilm-l6-v2"
    /// - Ollama: "nomic-embed-text", "mxbai-embed-large"
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Base URL override. For the external backend this points at an
    /// OpenAI-compatible root (or an Azure deployment path); for Ollama
    /// it replaces http://localhost:11434.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Azure-style `api-version` query parameter. Setting this switches
    /// the external adapter to `api-key` header auth.
    #[serde(default)]
    pub api_version: Option<String>,

    /// API credential. Falls back to OPENAI_API_KEY at construction.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Vector dimensionality override for models the adapters do not
    /// know about.
    #[serde(default)]
    pub dimension: Option<usize>,

    #[serde(default)]
    pub retry: RetryConfig,
}

/// Embedding backend options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Hosted OpenAI-compatible API (requires an API key)
    #[serde(rename = "openai")]
    External,

    /// Local fastembed ONNX model (CPU-based, no API needed)
    Local,

    /// Local Ollama server
    Ollama,
}

/// Retry policy for the hosted adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first, for transient failures only
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff before the first retry; doubles per attempt
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Backoff ceiling
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model_name: default_model_name(),
            endpoint: None,
            api_version: None,
            api_key: None,
            dimension: None,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for EmbeddingBackend {
    fn default() -> Self {
        EmbeddingBackend::Local
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl crate::validation::Validate for EmbeddingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.model_name.is_empty() {
            return Err(ConfigError::validation(
                "embedding.model_name",
                "Model name cannot be empty",
            ));
        }

        if self.retry.initial_backoff_ms > self.retry.max_backoff_ms {
            return Err(ConfigError::validation(
                "embedding.retry",
                "initial_backoff_ms cannot exceed max_backoff_ms",
            ));
        }

        if self.retry.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "embedding.retry.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        Ok(())
    }
}

fn default_model_name() -> String {
    "bge-small-en-v1.5".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    200
}

fn default_max_backoff_ms() -> u64 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}
