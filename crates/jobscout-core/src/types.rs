//! Domain types shared across the workspace.

use serde::{Deserialize, Serialize};

/// A bounded text fragment produced by sliding-window segmentation.
///
/// `chunk_index` is 0-based and dense within a `source_id`; `total_chunks`
/// is fixed once all chunks of a source are known. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub source_id: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// One (id, vector, payload) record as stored in a vector collection.
///
/// Ids are assigned by the index builder as a running counter scoped to one
/// build run; they are not stable across rebuilds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

/// Distance metric for a collection. Fixed for the collection's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Cosine,
    Dot,
    Euclid,
}

impl Distance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distance::Cosine => "Cosine",
            Distance::Dot => "Dot",
            Distance::Euclid => "Euclid",
        }
    }
}

/// Collection metadata reported by the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub points_count: u64,
    pub vector_size: usize,
}

/// One nearest-neighbor result, in the store's native similarity order.
/// Score semantics follow the collection's distance metric; no client-side
/// rescoring is ever applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub payload: serde_json::Value,
    pub score: f32,
}

/// A candidate profile extracted once per résumé: target role plus an
/// ordered skill list. Immutable input to the query relaxation planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub role: String,
    pub skills: Vec<String>,
}

impl Profile {
    pub fn new(role: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            role: role.into(),
            skills,
        }
    }
}

/// A job offer as returned by the external keyword search API, already
/// mapped out of its wire shape. Fields the upstream omits are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOffer {
    pub title: String,
    pub company: String,
    pub location: String,
    pub contract_type: String,
    pub description: String,
    pub apply_url: String,
    pub created_at: String,
}

/// Presentation projection of a [`JobOffer`].
///
/// `score` is synthetic: derived from the offer's rank in the upstream-ordered
/// list, not from any learned relevance signal the upstream provides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedOffer {
    pub title: String,
    pub company: String,
    pub location: String,
    pub contract_type: String,
    pub apply_url: String,
    pub created_at: String,
    pub score: f32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_as_str() {
        assert_eq!(Distance::Cosine.as_str(), "Cosine");
    }

    #[test]
    fn test_chunk_roundtrip() {
        let chunk = Chunk {
            text: "hello".into(),
            source_id: "doc.txt".into(),
            chunk_index: 0,
            total_chunks: 1,
        };
        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }
}
