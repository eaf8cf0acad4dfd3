//! # Jobscout Core
//!
//! Shared foundation for the Jobscout workspace: configuration, the error
//! taxonomy, domain types, and the trait seams for external collaborators
//! (embedding provider, vector store, generation model, text extractor).
//!
//! The collaborators are consumed through traits so the retrieval and
//! query-relaxation engines can be tested against in-memory fakes.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::JobscoutConfig;
pub use error::{JobscoutError, Result};
