//! Trait seams for external collaborators.
//!
//! The engines only ever see these contracts. Real implementations live in
//! `jobscout-providers`; tests use in-memory fakes. Handles are constructed
//! once at startup and shared as `Arc<dyn ...>`; none of these traits takes
//! `&mut self`, so concurrent requests may share them freely.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CollectionInfo, Distance, IndexedRecord, SearchHit};

/// Maps text to a fixed-dimension vector. Deterministic for identical input;
/// the dimension is fixed for the process lifetime.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimension of this embedder. Probed before any collection is
    /// created so a mismatch fails fast as a configuration error.
    async fn dimension(&self) -> Result<usize>;
}

/// A similarity-searchable, upsert-able collection of vector records.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<()>;

    /// Idempotent: deleting an absent collection is a no-op.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    async fn upsert(&self, collection: &str, records: &[IndexedRecord]) -> Result<()>;

    /// Nearest-neighbor query. Hits come back in the store's native
    /// similarity order (descending). Fewer than `limit` hits is normal.
    async fn query(&self, collection: &str, vector: &[f32], limit: usize)
    -> Result<Vec<SearchHit>>;

    async fn get_collection_info(&self, name: &str) -> Result<CollectionInfo>;

    async fn list_collections(&self) -> Result<Vec<String>>;
}

/// Text-generation collaborator. The core only supplies already-assembled
/// context; prompt templates belong to the callers.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String>;

    async fn health_check(&self) -> Result<bool>;
}

/// Turns raw uploaded bytes into plain text, or fails with an extraction
/// error for unsupported formats or unparseable content.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], declared_format: &str) -> Result<String>;
}
