//! Local Ollama chat client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sema_config::LlmConfig;
use sema_core::{Llm, ProviderError, Result};

const PROVIDER: &str = "ollama";
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

pub struct OllamaProvider {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let base_url = config
            .endpoint
            .clone()
            .or_else(|| std::env::var("OLLAMA_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        Ok(Self {
            client,
            model: config.model_name.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl Llm for OllamaProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": false,
            "options": { "temperature": self.temperature },
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            if status.is_client_error() && status.as_u16() != 429 {
                return Err(ProviderError::invalid_input(format!(
                    "chat request rejected ({}): {}",
                    status, text
                )));
            }
            return Err(ProviderError::unavailable(
                PROVIDER,
                format!("{}: {}", status, text),
            ));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(PROVIDER, e))?;

        json["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| {
                ProviderError::invalid_response(PROVIDER, "missing message content")
            })
    }
}
