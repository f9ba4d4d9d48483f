//! Configuration for sema: provider and metric settings with
//! validation, YAML/TOML file loading and a `SEMA_*` environment
//! overlay.

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};
pub use types::{
    EmbeddingBackend, EmbeddingConfig, LlmBackend, LlmConfig, MetricsConfig, RetryConfig,
};
pub use validation::Validate;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration: defaults, then an optional file, then the
    /// `SEMA_*` environment overlay on top.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => loader::file::from_file(p)?,
            None => Config::default(),
        };
        loader::env::apply_env(&mut config)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<()> {
        self.embedding.validate()?;
        self.llm.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}
