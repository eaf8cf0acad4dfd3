//! Index builder: (re)populates a vector collection from a corpus.
//!
//! Chunks every source document, embeds the chunks, and upserts them in
//! fixed-size batches. Record ids are a running 0-based counter scoped to a
//! single build run; they are not stable across rebuilds.

use serde_json::json;

use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::{Embedder, VectorStore};
use jobscout_core::types::{Distance, IndexedRecord};

use crate::chunker;

/// Records per upsert batch.
pub const UPSERT_BATCH_SIZE: usize = 100;

/// Startup-readiness wait: attempts and delay between them.
pub const READY_MAX_ATTEMPTS: u32 = 30;
pub const READY_RETRY_DELAY_SECS: u64 = 2;

/// One raw document of the corpus, already extracted to plain text.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source_id: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            text: text.into(),
        }
    }
}

/// How an existing collection is treated before a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildMode {
    /// Drop-if-exists, then create. Document ingestion is cheap and is
    /// expected to be rerun on every deploy.
    Recreate,
    /// If the collection already exists with a non-zero record count, the
    /// build is skipped entirely. Used for the job-offer corpus, where
    /// ingestion burns external API quota.
    SkipIfPopulated,
}

/// Orchestrates chunker + embedder + vector store into one build run.
pub struct IndexBuilder<'a> {
    embedder: &'a dyn Embedder,
    store: &'a dyn VectorStore,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        embedder: &'a dyn Embedder,
        store: &'a dyn VectorStore,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Build `collection` from `corpus`. Returns the number of records
    /// upserted (0 when a `SkipIfPopulated` build is a no-op).
    pub async fn build<I>(&self, corpus: I, collection: &str, mode: RebuildMode) -> Result<u64>
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        // Dimension is probed before any collection call so a mismatch is
        // caught as a configuration error, not mid-upsert.
        let dimension = self.embedder.dimension().await?;

        if mode == RebuildMode::SkipIfPopulated {
            if let Ok(info) = self.store.get_collection_info(collection).await {
                if info.points_count > 0 {
                    if info.vector_size != dimension {
                        return Err(JobscoutError::DimensionMismatch {
                            expected: info.vector_size,
                            actual: dimension,
                        });
                    }
                    tracing::info!(
                        collection,
                        records = info.points_count,
                        "collection already populated, skipping build"
                    );
                    return Ok(0);
                }
            }
        }

        self.store.delete_collection(collection).await?;
        self.store
            .create_collection(collection, dimension, Distance::Cosine)
            .await?;

        let mut batch: Vec<IndexedRecord> = Vec::with_capacity(UPSERT_BATCH_SIZE);
        let mut next_id: u64 = 0;

        for doc in corpus {
            let chunks = chunker::chunk(&doc.text, &doc.source_id, self.chunk_size, self.chunk_overlap)?;
            tracing::debug!(source = %doc.source_id, chunks = chunks.len(), "chunked document");

            for chunk in chunks {
                let vector = self.embedder.embed(&chunk.text).await?;
                batch.push(IndexedRecord {
                    id: next_id,
                    vector,
                    payload: json!({
                        "text": chunk.text,
                        "source_id": chunk.source_id,
                        "chunk_index": chunk.chunk_index,
                        "total_chunks": chunk.total_chunks,
                    }),
                });
                next_id += 1;

                if batch.len() >= UPSERT_BATCH_SIZE {
                    self.store.upsert(collection, &batch).await?;
                    batch.clear();
                }
            }
        }

        // Flush the partial final batch.
        if !batch.is_empty() {
            self.store.upsert(collection, &batch).await?;
        }

        tracing::info!(collection, records = next_id, "index build complete");
        Ok(next_id)
    }
}

/// Block until the vector store answers, retrying with a fixed delay.
///
/// This is a startup-readiness wait, not a per-operation retry: steady-state
/// requests never retry connectivity failures.
pub async fn wait_ready(store: &dyn VectorStore) -> Result<()> {
    let mut last_err = String::new();
    for attempt in 1..=READY_MAX_ATTEMPTS {
        match store.list_collections().await {
            Ok(_) => {
                tracing::info!("vector store is ready");
                return Ok(());
            }
            Err(e) => {
                last_err = e.to_string();
                if attempt < READY_MAX_ATTEMPTS {
                    tracing::warn!(
                        attempt,
                        max = READY_MAX_ATTEMPTS,
                        "vector store not ready, waiting"
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(READY_RETRY_DELAY_SECS))
                        .await;
                }
            }
        }
    }
    Err(JobscoutError::StoreUnavailable(format!(
        "not ready after {READY_MAX_ATTEMPTS} attempts: {last_err}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jobscout_core::types::{CollectionInfo, SearchHit};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeEmbedder {
        dimension: usize,
    }

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            // Deterministic toy embedding: character histogram folded into
            // the configured dimension.
            let mut v = vec![0.0f32; self.dimension];
            for (i, c) in text.chars().enumerate() {
                v[i % self.dimension] += (c as u32 % 17) as f32;
            }
            Ok(v)
        }

        async fn dimension(&self) -> Result<usize> {
            Ok(self.dimension)
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        collections: Mutex<HashMap<String, (usize, Vec<IndexedRecord>)>>,
    }

    #[async_trait]
    impl VectorStore for MemoryStore {
        async fn create_collection(
            &self,
            name: &str,
            dimension: usize,
            _distance: Distance,
        ) -> Result<()> {
            self.collections
                .lock()
                .unwrap()
                .insert(name.to_string(), (dimension, Vec::new()));
            Ok(())
        }

        async fn delete_collection(&self, name: &str) -> Result<()> {
            self.collections.lock().unwrap().remove(name);
            Ok(())
        }

        async fn upsert(&self, collection: &str, records: &[IndexedRecord]) -> Result<()> {
            let mut guard = self.collections.lock().unwrap();
            let entry = guard
                .get_mut(collection)
                .ok_or_else(|| JobscoutError::StoreUnavailable("no such collection".into()))?;
            entry.1.extend_from_slice(records);
            Ok(())
        }

        async fn query(
            &self,
            _collection: &str,
            _vector: &[f32],
            _limit: usize,
        ) -> Result<Vec<SearchHit>> {
            Ok(vec![])
        }

        async fn get_collection_info(&self, name: &str) -> Result<CollectionInfo> {
            let guard = self.collections.lock().unwrap();
            let (dim, records) = guard
                .get(name)
                .ok_or_else(|| JobscoutError::StoreUnavailable("no such collection".into()))?;
            Ok(CollectionInfo {
                name: name.to_string(),
                points_count: records.len() as u64,
                vector_size: *dim,
            })
        }

        async fn list_collections(&self) -> Result<Vec<String>> {
            Ok(self.collections.lock().unwrap().keys().cloned().collect())
        }
    }

    fn corpus() -> Vec<SourceDocument> {
        vec![
            SourceDocument::new("a.txt", "alpha beta gamma delta epsilon zeta eta theta"),
            SourceDocument::new("b.txt", "one two three four five six seven eight nine ten"),
        ]
    }

    #[tokio::test]
    async fn test_recreate_rebuild_is_idempotent_in_outcome() {
        let embedder = FakeEmbedder { dimension: 4 };
        let store = MemoryStore::default();
        let builder = IndexBuilder::new(&embedder, &store, 20, 5);

        let first = builder
            .build(corpus(), "docs", RebuildMode::Recreate)
            .await
            .unwrap();
        let second = builder
            .build(corpus(), "docs", RebuildMode::Recreate)
            .await
            .unwrap();

        assert_eq!(first, second);
        let info = store.get_collection_info("docs").await.unwrap();
        assert_eq!(info.points_count, second);
    }

    #[tokio::test]
    async fn test_skip_if_populated_is_a_noop() {
        let embedder = FakeEmbedder { dimension: 4 };
        let store = MemoryStore::default();
        let builder = IndexBuilder::new(&embedder, &store, 20, 5);

        let first = builder
            .build(corpus(), "offers", RebuildMode::SkipIfPopulated)
            .await
            .unwrap();
        assert!(first > 0);

        let upserted = builder
            .build(corpus(), "offers", RebuildMode::SkipIfPopulated)
            .await
            .unwrap();
        assert_eq!(upserted, 0);

        let info = store.get_collection_info("offers").await.unwrap();
        assert_eq!(info.points_count, first);
    }

    #[tokio::test]
    async fn test_skip_if_populated_detects_dimension_drift() {
        let store = MemoryStore::default();
        {
            let embedder = FakeEmbedder { dimension: 4 };
            let builder = IndexBuilder::new(&embedder, &store, 20, 5);
            builder
                .build(corpus(), "offers", RebuildMode::SkipIfPopulated)
                .await
                .unwrap();
        }

        let embedder = FakeEmbedder { dimension: 8 };
        let builder = IndexBuilder::new(&embedder, &store, 20, 5);
        let err = builder
            .build(corpus(), "offers", RebuildMode::SkipIfPopulated)
            .await
            .unwrap_err();
        assert!(matches!(err, JobscoutError::DimensionMismatch { .. }));
    }

    #[tokio::test]
    async fn test_record_ids_are_dense_across_the_run() {
        let embedder = FakeEmbedder { dimension: 4 };
        let store = MemoryStore::default();
        let builder = IndexBuilder::new(&embedder, &store, 10, 2);

        let total = builder
            .build(corpus(), "docs", RebuildMode::Recreate)
            .await
            .unwrap();

        let guard = store.collections.lock().unwrap();
        let records = &guard.get("docs").unwrap().1;
        assert_eq!(records.len() as u64, total);
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (0..total).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_payload_carries_chunk_fields() {
        let embedder = FakeEmbedder { dimension: 4 };
        let store = MemoryStore::default();
        let builder = IndexBuilder::new(&embedder, &store, 20, 5);

        builder
            .build(corpus(), "docs", RebuildMode::Recreate)
            .await
            .unwrap();

        let guard = store.collections.lock().unwrap();
        let records = &guard.get("docs").unwrap().1;
        let payload = &records[0].payload;
        assert_eq!(payload["source_id"], "a.txt");
        assert_eq!(payload["chunk_index"], 0);
        assert!(payload["text"].as_str().is_some());
        assert!(payload["total_chunks"].as_u64().unwrap() > 0);
    }
}
