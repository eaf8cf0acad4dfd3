//! OpenAI-compatible generation client.
//!
//! One struct covers every OpenAI-compatible chat-completions server (vLLM,
//! Ollama, cloud providers); endpoints differ only by base URL and API key.

use async_trait::async_trait;
use serde_json::{Value, json};

use jobscout_core::config::LlmConfig;
use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::Generator;

const GENERATE_TIMEOUT_SECS: u64 = 60;

pub struct OpenAiGenerator {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .build()
            .map_err(|e| JobscoutError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_key)
        }
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String> {
        let body = json!({
            "model": self.model,
            "temperature": temperature,
            "max_tokens": max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let url = format!("{}/chat/completions", self.base_url);
        let request = self.apply_auth(self.http.post(&url).json(&body));

        let response = request.send().await.map_err(|e| {
            JobscoutError::Provider(format!("generation request failed ({url}): {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(JobscoutError::Provider(format!(
                "generation server returned {status}: {text}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| JobscoutError::Provider(format!("invalid generation response: {e}")))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| JobscoutError::Provider("no choices in generation response".into()))
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.base_url);
        let response = self.apply_auth(self.http.get(&url)).send().await;
        Ok(matches!(response, Ok(r) if r.status().is_success()))
    }
}
