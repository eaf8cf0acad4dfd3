//! # Jobscout Index
//!
//! Offline pipeline that turns raw documents into a searchable vector
//! collection: sliding-window chunking, batched embedding, and idempotent
//! collection (re)population.

pub mod builder;
pub mod chunker;

pub use builder::{IndexBuilder, RebuildMode, SourceDocument};
pub use chunker::chunk;
