//! # Jobscout Retrieval
//!
//! Online semantic path: embed a query once, ask the vector store for the
//! top-K nearest records, and project the hits into bounded, truncated
//! representations for humans and for the generation model.

pub mod engine;
pub mod format;

pub use engine::retrieve;
pub use format::{DocumentSource, format_hits, format_offers, hit_context, offer_context};
