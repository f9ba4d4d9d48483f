//! Hosted OpenAI-compatible chat client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sema_config::LlmConfig;
use sema_core::{Llm, ProviderError, Result};
use tracing::debug;

const PROVIDER: &str = "openai";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ProviderError::invalid_input("no API key: set llm.api_key or OPENAI_API_KEY")
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e))?;

        Ok(Self {
            client,
            api_key,
            model: config.model_name.clone(),
            api_base: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            temperature: config.temperature,
        })
    }

    async fn chat_inner(&self, prompt: &str, n: usize) -> Result<Vec<String>> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
            "n": n,
        });

        let res = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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

        let choices = json
            .get("choices")
            .and_then(|c| c.as_array())
            .ok_or_else(|| ProviderError::invalid_response(PROVIDER, "missing choices"))?;

        let mut outputs = Vec::with_capacity(choices.len());
        for choice in choices {
            let content = choice["message"]["content"].as_str().ok_or_else(|| {
                ProviderError::invalid_response(PROVIDER, "missing content in choice")
            })?;
            outputs.push(content.trim().to_string());
        }

        debug!(model = %self.model, samples = outputs.len(), "chat completion");
        if outputs.len() != n {
            return Err(ProviderError::invalid_response(
                PROVIDER,
                format!("got {} completions, requested {}", outputs.len(), n),
            ));
        }

        Ok(outputs)
    }
}

#[async_trait]
impl Llm for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut outputs = self.chat_inner(prompt, 1).await?;
        outputs
            .pop()
            .ok_or_else(|| ProviderError::invalid_response(PROVIDER, "empty completion list"))
    }

    // OpenAI supports multi-sampling natively via the `n` body field
    async fn generate(&self, prompt: &str, n: usize) -> Result<Vec<String>> {
        self.chat_inner(prompt, n).await
    }
}
