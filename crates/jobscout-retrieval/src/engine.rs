//! Retrieval engine: one embedding, one nearest-neighbor query.
//!
//! Whatever ordering and score values the store produces are passed through
//! verbatim: no reranking, deduplication, or filtering. An empty result set
//! is a valid outcome ("no relevant content"), distinct from a store failure.

use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::{Embedder, VectorStore};
use jobscout_core::types::SearchHit;

/// Retrieve the `top_k` nearest records for `query_text` from `collection`.
pub async fn retrieve(
    query_text: &str,
    top_k: usize,
    collection: &str,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
) -> Result<Vec<SearchHit>> {
    if top_k == 0 {
        return Err(JobscoutError::Config("top_k must be at least 1".into()));
    }

    let vector = embedder.embed(query_text).await?;
    let hits = store.query(collection, &vector, top_k).await?;
    tracing::debug!(collection, top_k, hits = hits.len(), "retrieval done");
    Ok(hits)
}
