//! Jobscout configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JobscoutError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobscoutConfig {
    #[serde(default)]
    pub qdrant: QdrantConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub france_travail: FranceTravailConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for JobscoutConfig {
    fn default() -> Self {
        Self {
            qdrant: QdrantConfig::default(),
            embedding: EmbeddingConfig::default(),
            llm: LlmConfig::default(),
            index: IndexConfig::default(),
            search: SearchConfig::default(),
            france_travail: FranceTravailConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl JobscoutConfig {
    /// Load config from the default path (~/.jobscout/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JobscoutError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| JobscoutError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jobscout")
            .join("config.toml")
    }
}

/// Vector store (Qdrant) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    #[serde(default = "default_qdrant_url")]
    pub url: String,
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

fn default_qdrant_url() -> String {
    std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6333".into())
}
fn default_store_timeout() -> u64 {
    10
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: default_qdrant_url(),
            timeout_secs: default_store_timeout(),
        }
    }
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_embedding_endpoint() -> String {
    "http://localhost:8080/v1".into()
}
fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".into()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_embedding_endpoint(),
            model: default_embedding_model(),
            api_key: String::new(),
        }
    }
}

/// Generation model (vLLM / OpenAI-compatible) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_api_key")]
    pub api_key: String,
}

fn default_llm_endpoint() -> String {
    "http://localhost:8000/v1".into()
}
fn default_llm_model() -> String {
    "Qwen/Qwen2.5-1.5B-Instruct".into()
}
fn default_llm_api_key() -> String {
    // vLLM accepts any non-empty key
    "EMPTY".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: default_llm_api_key(),
        }
    }
}

/// Indexing pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_document_collection")]
    pub document_collection: String,
    #[serde(default = "default_offer_collection")]
    pub offer_collection: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_document_collection() -> String {
    "documents".into()
}
fn default_offer_collection() -> String {
    "job_offers".into()
}
fn default_chunk_size() -> usize {
    500
}
fn default_chunk_overlap() -> usize {
    50
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            document_collection: default_document_collection(),
            offer_collection: default_offer_collection(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// France Travail job-search API configuration.
///
/// Credentials resolve from the config file first, then the
/// `FRANCE_TRAVAIL_CLIENT_ID` / `FRANCE_TRAVAIL_CLIENT_SECRET` environment
/// variables. Missing credentials are a fatal error at call time, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FranceTravailConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_ft_api_url")]
    pub api_url: String,
    #[serde(default = "default_ft_token_url")]
    pub token_url: String,
}

fn default_ft_api_url() -> String {
    "https://api.francetravail.io/partenaire/offresdemploi/v2/offres/search".into()
}
fn default_ft_token_url() -> String {
    "https://entreprise.pole-emploi.fr/connexion/oauth2/access_token?realm=%2Fpartenaire".into()
}

impl Default for FranceTravailConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_url: default_ft_api_url(),
            token_url: default_ft_token_url(),
        }
    }
}

impl FranceTravailConfig {
    /// Resolved client id: config value, then environment.
    pub fn resolved_client_id(&self) -> String {
        if !self.client_id.is_empty() {
            self.client_id.clone()
        } else {
            std::env::var("FRANCE_TRAVAIL_CLIENT_ID").unwrap_or_default()
        }
    }

    /// Resolved client secret: config value, then environment.
    pub fn resolved_client_secret(&self) -> String {
        if !self.client_secret.is_empty() {
            self.client_secret.clone()
        } else {
            std::env::var("FRANCE_TRAVAIL_CLIENT_SECRET").unwrap_or_default()
        }
    }
}

/// Gateway (HTTP API) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8001
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JobscoutConfig::default();
        assert_eq!(config.index.chunk_size, 500);
        assert_eq!(config.index.chunk_overlap, 50);
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.gateway.port, 8001);
        assert_eq!(config.index.document_collection, "documents");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [index]
            chunk_size = 800
            chunk_overlap = 100

            [search]
            top_k = 5

            [llm]
            model = "mistralai/Mistral-7B-Instruct-v0.3"
        "#;

        let config: JobscoutConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.index.chunk_size, 800);
        assert_eq!(config.index.chunk_overlap, 100);
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.llm.model, "mistralai/Mistral-7B-Instruct-v0.3");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: JobscoutConfig = toml::from_str("").unwrap();
        assert_eq!(config.index.offer_collection, "job_offers");
        assert!(config.france_travail.api_url.contains("francetravail.io"));
    }
}
