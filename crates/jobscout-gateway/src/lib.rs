//! # Jobscout Gateway
//!
//! HTTP API over the retrieval and job-search engines: question answering
//! grounded in indexed documents, raw semantic search, collection stats, and
//! CV upload with job matching.

pub mod prompts;
pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
