//! Error types for embedding providers, LLM clients and metrics

use thiserror::Error;

/// Result type for provider and metric operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors surfaced by embedding providers, LLM clients and the metrics
/// built on top of them.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Backend could not be reached, or kept failing after the retry
    /// budget was exhausted. Never produced for input problems.
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    /// Input the backend cannot accept: empty text, text over the token
    /// limit, missing credentials. Not retryable.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Two vectors from different spaces were compared. Contract
    /// violation; the metric layer checks this defensively.
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Backend answered but the payload was malformed or incomplete.
    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ProviderError {
    pub fn unavailable(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }
}
