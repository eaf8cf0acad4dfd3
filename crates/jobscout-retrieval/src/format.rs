//! Result formatting: bounded, truncated projections of hits and offers.
//!
//! Semantic hits keep the store-provided score unchanged. Keyword-search
//! offers carry no upstream score, so a synthetic one is derived from rank:
//! `1.0 - rank * 0.05`. That is a documented heuristic encoding
//! result-order-as-relevance, not a learned metric.

use serde::{Deserialize, Serialize};

use jobscout_core::types::{FormattedOffer, JobOffer, SearchHit};

/// Preview length for semantic hit text shown to users.
pub const TEXT_PREVIEW_LEN: usize = 200;
/// Description budget for offers shown to users.
pub const DISPLAY_DESCRIPTION_LEN: usize = 300;
/// Description budget for offers fed to the generation model.
pub const CONTEXT_DESCRIPTION_LEN: usize = 500;
/// How many offers make it into the generation context.
pub const CONTEXT_MAX_OFFERS: usize = 5;
/// Per-rank decrement of the synthetic score.
pub const SCORE_STEP: f32 = 0.05;

/// A semantic hit projected for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSource {
    pub source_id: String,
    pub chunk_index: u64,
    pub score: f32,
    pub text: String,
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Project semantic hits into bounded sources. Scores pass through unchanged.
pub fn format_hits(hits: &[SearchHit]) -> Vec<DocumentSource> {
    hits.iter()
        .map(|hit| DocumentSource {
            source_id: hit.payload["source_id"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            chunk_index: hit.payload["chunk_index"].as_u64().unwrap_or(0),
            score: hit.score,
            text: truncate(hit.payload["text"].as_str().unwrap_or(""), TEXT_PREVIEW_LEN),
        })
        .collect()
}

/// Assemble the grounding context for the generation model from hits.
/// Full chunk text here; truncation only applies to the user-facing preview.
pub fn hit_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(idx, hit)| {
            format!(
                "[Document {}: {}, chunk {}]\n{}",
                idx + 1,
                hit.payload["source_id"].as_str().unwrap_or("unknown"),
                hit.payload["chunk_index"].as_u64().unwrap_or(0),
                hit.payload["text"].as_str().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Project offers for API responses, assigning the rank-derived score.
pub fn format_offers(offers: &[JobOffer]) -> Vec<FormattedOffer> {
    offers
        .iter()
        .enumerate()
        .map(|(rank, offer)| FormattedOffer {
            title: offer.title.clone(),
            company: offer.company.clone(),
            location: offer.location.clone(),
            contract_type: offer.contract_type.clone(),
            apply_url: offer.apply_url.clone(),
            created_at: offer.created_at.clone(),
            score: 1.0 - rank as f32 * SCORE_STEP,
            description: truncate(&offer.description, DISPLAY_DESCRIPTION_LEN),
        })
        .collect()
}

/// Context blocks for the generation model: first 5 offers only, with the
/// wider 500-character description budget.
pub fn offer_context(offers: &[JobOffer]) -> Vec<String> {
    offers
        .iter()
        .take(CONTEXT_MAX_OFFERS)
        .enumerate()
        .map(|(idx, offer)| {
            format!(
                "[Offer {}]\nTitle: {}\nCompany: {}\nLocation: {}\nContract: {}\nDescription: {}",
                idx + 1,
                offer.title,
                offer.company,
                offer.location,
                offer.contract_type,
                truncate(&offer.description, CONTEXT_DESCRIPTION_LEN),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offer(title: &str, description: &str) -> JobOffer {
        JobOffer {
            title: title.into(),
            company: "Acme".into(),
            location: "Paris".into(),
            contract_type: "CDI".into(),
            description: description.into(),
            apply_url: "https://example.com/apply".into(),
            created_at: "2026-01-15T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_synthetic_scores_decrease_by_rank() {
        let offers = vec![offer("a", "x"), offer("b", "x"), offer("c", "x")];
        let formatted = format_offers(&offers);
        let scores: Vec<f32> = formatted.iter().map(|o| o.score).collect();
        assert_eq!(scores, vec![1.0, 0.95, 0.90]);
        assert!(scores.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_display_description_truncated_to_300() {
        let long = "d".repeat(400);
        let formatted = format_offers(&[offer("a", &long)]);
        assert_eq!(formatted[0].description.chars().count(), 303);
        assert!(formatted[0].description.ends_with("..."));
    }

    #[test]
    fn test_short_description_is_not_marked() {
        let formatted = format_offers(&[offer("a", "short description")]);
        assert_eq!(formatted[0].description, "short description");
    }

    #[test]
    fn test_context_uses_independent_500_char_budget() {
        let long = "d".repeat(400);
        let blocks = offer_context(&[offer("a", &long)]);
        // 400 chars fit the context budget even though display cuts at 300.
        assert!(blocks[0].contains(&long));
    }

    #[test]
    fn test_context_keeps_first_five_offers_only() {
        let offers: Vec<JobOffer> = (0..8).map(|i| offer(&format!("job {i}"), "x")).collect();
        let blocks = offer_context(&offers);
        assert_eq!(blocks.len(), 5);
        assert!(blocks[0].starts_with("[Offer 1]"));
        assert!(blocks[4].starts_with("[Offer 5]"));
    }

    #[test]
    fn test_hit_preview_truncated_with_score_passthrough() {
        let hits = vec![SearchHit {
            payload: json!({
                "text": "t".repeat(250),
                "source_id": "doc.txt",
                "chunk_index": 2,
            }),
            score: 0.8731,
        }];
        let sources = format_hits(&hits);
        assert_eq!(sources[0].score, 0.8731);
        assert_eq!(sources[0].source_id, "doc.txt");
        assert_eq!(sources[0].chunk_index, 2);
        assert_eq!(sources[0].text.chars().count(), 203);
        assert!(sources[0].text.ends_with("..."));
    }

    #[test]
    fn test_hit_context_keeps_full_text() {
        let hits = vec![SearchHit {
            payload: json!({
                "text": "t".repeat(250),
                "source_id": "doc.txt",
                "chunk_index": 0,
            }),
            score: 0.5,
        }];
        let context = hit_context(&hits);
        assert!(context.contains(&"t".repeat(250)));
        assert!(context.starts_with("[Document 1: doc.txt, chunk 0]"));
    }
}
