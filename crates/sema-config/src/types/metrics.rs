//! Metric configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Number of questions generated per answer by the relevance
    /// metric. Ideal range is 3 to 5.
    #[serde(default = "default_strictness")]
    pub strictness: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            strictness: default_strictness(),
        }
    }
}

impl crate::validation::Validate for MetricsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.strictness == 0 || self.strictness > 10 {
            return Err(ConfigError::validation(
                "metrics.strictness",
                format!("Strictness must be between 1 and 10, got {}", self.strictness),
            ));
        }

        Ok(())
    }
}

fn default_strictness() -> usize {
    3
}
