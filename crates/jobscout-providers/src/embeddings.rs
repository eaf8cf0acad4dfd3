//! OpenAI-compatible embeddings client.
//!
//! Works with any server exposing `POST /embeddings` in the OpenAI shape
//! (text-embeddings-inference, vLLM, OpenAI itself). The output dimension is
//! probed once with a throwaway input and cached for the process lifetime.

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::OnceCell;

use jobscout_core::config::EmbeddingConfig;
use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::Embedder;

const EMBED_TIMEOUT_SECS: u64 = 10;

pub struct OpenAiEmbedder {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    dimension: OnceCell<usize>,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(EMBED_TIMEOUT_SECS))
            .build()
            .map_err(|e| JobscoutError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimension: OnceCell::new(),
        })
    }

    async fn embed_raw(&self, text: &str) -> Result<Vec<f32>> {
        let mut request = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .json(&json!({ "model": self.model, "input": [text] }));
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| JobscoutError::Provider(format!("embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(JobscoutError::Provider(format!(
                "embedding server returned {status}: {body}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| JobscoutError::Provider(format!("invalid embedding response: {e}")))?;

        let vector: Vec<f32> = body["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| {
                JobscoutError::Provider("embedding response missing data[0].embedding".into())
            })?
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        if vector.is_empty() {
            return Err(JobscoutError::Provider("empty embedding vector".into()));
        }
        Ok(vector)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_raw(text).await
    }

    async fn dimension(&self) -> Result<usize> {
        self.dimension
            .get_or_try_init(|| async {
                let probe = self.embed_raw("dimension probe").await?;
                tracing::info!(dimension = probe.len(), model = %self.model, "probed embedding dimension");
                Ok(probe.len())
            })
            .await
            .copied()
    }
}
