//! Qdrant vector store client over the REST API.

use async_trait::async_trait;
use serde_json::{Value, json};

use jobscout_core::config::QdrantConfig;
use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::VectorStore;
use jobscout_core::types::{CollectionInfo, Distance, IndexedRecord, SearchHit};

pub struct QdrantStore {
    http: reqwest::Client,
    base_url: String,
}

impl QdrantStore {
    pub fn new(config: &QdrantConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JobscoutError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_result(response: reqwest::Response, context: &str) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            JobscoutError::StoreUnavailable(format!("{context}: invalid response: {e}"))
        })?;
        if !status.is_success() {
            return Err(JobscoutError::StoreUnavailable(format!(
                "{context}: status {status}: {body}"
            )));
        }
        Ok(body["result"].clone())
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<()> {
        let body = json!({
            "vectors": { "size": dimension, "distance": distance.as_str() }
        });
        let response = self
            .http
            .put(self.url(&format!("/collections/{name}")))
            .json(&body)
            .send()
            .await
            .map_err(|e| JobscoutError::StoreUnavailable(format!("create_collection: {e}")))?;
        Self::read_result(response, "create_collection").await?;
        tracing::info!(collection = name, dimension, "created collection");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/collections/{name}")))
            .send()
            .await
            .map_err(|e| JobscoutError::StoreUnavailable(format!("delete_collection: {e}")))?;
        // Absent collections come back 404; deletion is idempotent.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::read_result(response, "delete_collection").await?;
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[IndexedRecord]) -> Result<()> {
        let points: Vec<Value> = records
            .iter()
            .map(|r| json!({ "id": r.id, "vector": r.vector, "payload": r.payload }))
            .collect();
        let response = self
            .http
            .put(self.url(&format!("/collections/{collection}/points?wait=true")))
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| JobscoutError::StoreUnavailable(format!("upsert: {e}")))?;
        Self::read_result(response, "upsert").await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let body = json!({
            "query": vector,
            "limit": limit,
            "with_payload": true,
        });
        let response = self
            .http
            .post(self.url(&format!("/collections/{collection}/points/query")))
            .json(&body)
            .send()
            .await
            .map_err(|e| JobscoutError::StoreUnavailable(format!("query: {e}")))?;
        let result = Self::read_result(response, "query").await?;

        let hits = result["points"]
            .as_array()
            .map(|points| {
                points
                    .iter()
                    .map(|p| SearchHit {
                        payload: p["payload"].clone(),
                        score: p["score"].as_f64().unwrap_or(0.0) as f32,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(hits)
    }

    async fn get_collection_info(&self, name: &str) -> Result<CollectionInfo> {
        let response = self
            .http
            .get(self.url(&format!("/collections/{name}")))
            .send()
            .await
            .map_err(|e| JobscoutError::StoreUnavailable(format!("get_collection_info: {e}")))?;
        let result = Self::read_result(response, "get_collection_info").await?;

        Ok(CollectionInfo {
            name: name.to_string(),
            points_count: result["points_count"].as_u64().unwrap_or(0),
            vector_size: result["config"]["params"]["vectors"]["size"]
                .as_u64()
                .unwrap_or(0) as usize,
        })
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(self.url("/collections"))
            .send()
            .await
            .map_err(|e| JobscoutError::StoreUnavailable(format!("list_collections: {e}")))?;
        let result = Self::read_result(response, "list_collections").await?;

        Ok(result["collections"]
            .as_array()
            .map(|collections| {
                collections
                    .iter()
                    .filter_map(|c| c["name"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default())
    }
}
