//! Query relaxation planner.
//!
//! Produces an ordered sequence of keyword queries of strictly decreasing
//! specificity from a profile, then drives sequential attempts against the
//! keyword-only endpoint until one yields offers or the sequence runs out.
//! Each attempt's outcome is a tagged result; the stop/continue decision is a
//! pure function of the tag, never exception-driven.

use async_trait::async_trait;

use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::types::{JobOffer, Profile};

/// Character budget per candidate query string.
pub const QUERY_CHAR_BUDGET: usize = 50;
/// Role is reduced to this many leading words before it enters a query.
pub const ROLE_WORD_LIMIT: usize = 3;
/// Keywords this short are omitted from the request entirely; the endpoint
/// treats them as noise.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Outcome of one strategy attempt, as classified from the upstream response.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Upstream explicitly signaled "no content" for this query.
    SoftEmpty,
    /// Response body was not JSON or failed to parse as JSON.
    Malformed(String),
    /// Parsed successfully; the list may still be empty.
    Offers(Vec<JobOffer>),
}

/// One keyword-search round trip. `keyword == None` means "no filter":
/// the endpoint returns its default (most recent) result set.
#[async_trait]
pub trait OfferSearch: Send + Sync {
    async fn search(&self, keyword: Option<&str>, max_results: usize) -> Result<SearchOutcome>;
}

fn truncate_query(query: &str) -> String {
    query.chars().take(QUERY_CHAR_BUDGET).collect()
}

/// Build the ordered strategy sequence for a profile.
///
/// 1. role (first 3 words) + first 2 skills, the most specific;
/// 2. skills from index 2 onward, when more than 2 exist;
/// 3. role alone (first 3 words);
/// 4. first skill alone;
/// 5. the empty string: guaranteed terminal fallback, so the sequence is
///    never empty.
pub fn plan(profile: &Profile) -> Vec<String> {
    let short_role = profile
        .role
        .split_whitespace()
        .take(ROLE_WORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ");

    let skills: Vec<&str> = profile
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let mut strategies = Vec::new();

    if !short_role.is_empty() && !skills.is_empty() {
        let first_skills = skills[..skills.len().min(2)].join(" ");
        strategies.push(truncate_query(&format!("{short_role} {first_skills}")));
    }

    if skills.len() > 2 {
        strategies.push(truncate_query(&skills[2..].join(" ")));
    }

    if !short_role.is_empty() {
        strategies.push(truncate_query(&short_role));
    }

    if let Some(first) = skills.first() {
        strategies.push(truncate_query(first));
    }

    strategies.push(String::new());
    strategies
}

/// Try each strategy in order. Stops at the first non-empty offer list;
/// exhausting every strategy is a legitimate empty result, not an error.
///
/// A malformed response advances to the next strategy when one remains, but
/// is fatal on the last strategy. That asymmetry is inherited behavior and
/// kept as-is.
pub async fn execute(
    strategies: &[String],
    search: &dyn OfferSearch,
    max_results: usize,
) -> Result<Vec<JobOffer>> {
    let last = strategies.len().saturating_sub(1);

    for (idx, strategy) in strategies.iter().enumerate() {
        let keyword = if strategy.chars().count() > MIN_KEYWORD_LEN {
            Some(strategy.as_str())
        } else {
            None
        };

        tracing::info!(
            strategy = idx + 1,
            total = strategies.len(),
            keywords = %strategy,
            "trying search strategy"
        );

        match search.search(keyword, max_results).await? {
            SearchOutcome::SoftEmpty => {
                tracing::debug!(strategy = idx + 1, "no content, relaxing query");
            }
            SearchOutcome::Malformed(reason) => {
                if idx < last {
                    tracing::warn!(strategy = idx + 1, %reason, "malformed response, relaxing query");
                } else {
                    return Err(JobscoutError::UpstreamFormat(reason));
                }
            }
            SearchOutcome::Offers(offers) => {
                if offers.is_empty() {
                    tracing::debug!(strategy = idx + 1, "zero offers, relaxing query");
                } else {
                    tracing::info!(strategy = idx + 1, offers = offers.len(), "strategy succeeded");
                    return Ok(offers);
                }
            }
        }
    }

    tracing::info!("all search strategies exhausted, no offers found");
    Ok(vec![])
}
