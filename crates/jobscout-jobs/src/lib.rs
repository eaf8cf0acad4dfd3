//! # Jobscout Jobs
//!
//! The keyword-fallback search path. The external job API supports only
//! keyword queries, silently answers "no content" to over-specific ones, and
//! occasionally returns non-JSON bodies. The planner works around all three
//! with an ordered sequence of queries of decreasing specificity, executed
//! until one yields offers.

pub mod france_travail;
pub mod planner;
pub mod profile;

pub use france_travail::{FranceTravailClient, OfferFinder};
pub use planner::{OfferSearch, SearchOutcome, execute, plan};
pub use profile::extract_profile;
