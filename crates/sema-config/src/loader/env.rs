//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `SEMA_<section>_<field>=value`
//!
//! Examples:
//! - `SEMA_EMBEDDING_BACKEND=openai`
//! - `SEMA_EMBEDDING_MODEL_NAME=text-embedding-3-small`
//! - `SEMA_LLM_TIMEOUT_SECS=120`

use std::env;

use crate::{
    error::ConfigError,
    types::{EmbeddingBackend, EmbeddingConfig, LlmBackend, LlmConfig, MetricsConfig},
    Config, Result,
};

/// Apply `SEMA_*` environment variables on top of an existing config
pub fn apply_env(config: &mut Config) -> Result<()> {
    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with("SEMA_"))
        .collect();

    for (key, value) in env_vars {
        apply_env_var(config, &key, &value)?;
    }

    Ok(())
}

fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let stripped = key.strip_prefix("SEMA_").unwrap_or(key);

    let parts: Vec<&str> = stripped.split('_').collect();
    if parts.len() < 2 {
        return Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: SEMA_<section>_<field>".to_string(),
        });
    }

    let section = parts[0].to_lowercase();
    let field = parts[1..].join("_").to_lowercase();

    match section.as_str() {
        "embedding" => apply_embedding_var(&mut config.embedding, &field, value),
        "llm" => apply_llm_var(&mut config.llm, &field, value),
        "metrics" => apply_metrics_var(&mut config.metrics, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn apply_embedding_var(config: &mut EmbeddingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "backend" => {
            config.backend = match value.to_lowercase().as_str() {
                "openai" => EmbeddingBackend::External,
                "local" => EmbeddingBackend::Local,
                "ollama" => EmbeddingBackend::Ollama,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "embedding.backend",
                        value,
                        &["openai", "local", "ollama"],
                    ))
                }
            };
        }
        "model_name" => config.model_name = value.to_string(),
        "endpoint" => config.endpoint = Some(value.to_string()),
        "api_version" => config.api_version = Some(value.to_string()),
        "api_key" => config.api_key = Some(value.to_string()),
        "dimension" => {
            config.dimension = Some(parse_int(field, value)?);
        }
        "retry_max_retries" => {
            config.retry.max_retries = parse_int(field, value)? as u32;
        }
        "retry_timeout_secs" => {
            config.retry.timeout_secs = parse_int(field, value)? as u64;
        }
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("SEMA_EMBEDDING_{}", field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn apply_llm_var(config: &mut LlmConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "backend" => {
            config.backend = match value.to_lowercase().as_str() {
                "openai" => LlmBackend::OpenAi,
                "ollama" => LlmBackend::Ollama,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "llm.backend",
                        value,
                        &["openai", "ollama"],
                    ))
                }
            };
        }
        "model_name" => config.model_name = value.to_string(),
        "endpoint" => config.endpoint = Some(value.to_string()),
        "api_key" => config.api_key = Some(value.to_string()),
        "timeout_secs" => config.timeout_secs = parse_int(field, value)? as u64,
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("SEMA_LLM_{}", field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn apply_metrics_var(config: &mut MetricsConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "strictness" => config.strictness = parse_int(field, value)?,
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("SEMA_METRICS_{}", field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn parse_int(field: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| ConfigError::EnvVarError {
        var: field.to_string(),
        message: format!("Invalid integer: {}", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_override() {
        let mut config = Config::default();
        apply_env_var(&mut config, "SEMA_EMBEDDING_BACKEND", "openai").unwrap();
        assert_eq!(config.embedding.backend, EmbeddingBackend::External);
    }

    #[test]
    fn test_model_name_override() {
        let mut config = Config::default();
        apply_env_var(&mut config, "SEMA_EMBEDDING_MODEL_NAME", "bge-base-en-v1.5").unwrap();
        assert_eq!(config.embedding.model_name, "bge-base-en-v1.5");
    }

    #[test]
    fn test_strictness_override() {
        let mut config = Config::default();
        apply_env_var(&mut config, "SEMA_METRICS_STRICTNESS", "5").unwrap();
        assert_eq!(config.metrics.strictness, 5);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let mut config = Config::default();
        let err = apply_env_var(&mut config, "SEMA_EMBEDDING_BACKEND", "cohere").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnum { .. }));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let mut config = Config::default();
        let err = apply_env_var(&mut config, "SEMA_STORAGE_PATH", "/tmp").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarError { .. }));
    }

    #[test]
    fn test_bad_integer_rejected() {
        let mut config = Config::default();
        let err = apply_env_var(&mut config, "SEMA_LLM_TIMEOUT_SECS", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarError { .. }));
    }
}
