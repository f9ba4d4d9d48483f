//! LLM client configuration

use serde::{Deserialize, Serialize};

/// LLM client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub backend: LlmBackend,

    /// Model name for the selected backend
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Base URL override (OpenAI-compatible root or Ollama base)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API credential. Falls back to OPENAI_API_KEY at construction.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature; 0 keeps metric judgments deterministic
    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    OpenAi,
    Ollama,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::default(),
            model_name: default_model_name(),
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            temperature: 0.0,
        }
    }
}

impl Default for LlmBackend {
    fn default() -> Self {
        LlmBackend::Ollama
    }
}

impl crate::validation::Validate for LlmConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.model_name.is_empty() {
            return Err(ConfigError::validation(
                "llm.model_name",
                "Model name cannot be empty",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::validation(
                "llm.temperature",
                format!("Temperature must be in [0, 2], got {}", self.temperature),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "llm.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        Ok(())
    }
}

fn default_model_name() -> String {
    "llama3.1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}
