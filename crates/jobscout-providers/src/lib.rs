//! # Jobscout Providers
//!
//! Real implementations of the collaborator traits: a Qdrant REST client,
//! an OpenAI-compatible embeddings client, an OpenAI-compatible generation
//! client, and a plain-text extractor. Each is constructed once at startup
//! and shared as an immutable handle.

pub mod embeddings;
pub mod extract;
pub mod llm;
pub mod qdrant;

pub use embeddings::OpenAiEmbedder;
pub use extract::PlainTextExtractor;
pub use llm::OpenAiGenerator;
pub use qdrant::QdrantStore;
