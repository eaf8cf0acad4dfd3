//! France Travail job-search API client.
//!
//! Auth is a fixed-scope OAuth2 client-credentials exchange; search is a
//! plain GET with a keyword parameter, a result range, and a sort order.
//! The endpoint answers 204 for "no matching content" and occasionally
//! returns non-JSON bodies, both of which the planner treats as signals to
//! relax the query rather than as hard failures.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use jobscout_core::config::FranceTravailConfig;
use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::types::{JobOffer, Profile};

use crate::planner::{self, OfferSearch, SearchOutcome};

/// OAuth scope required by the offers API.
const TOKEN_SCOPE: &str = "api_offresdemploiv2 o2dsoffre";
/// Timeouts per the upstream's observed latency: auth is quick, search can
/// take longer under load.
const TOKEN_TIMEOUT_SECS: u64 = 10;
const SEARCH_TIMEOUT_SECS: u64 = 15;

/// The gateway's seam for the whole keyword-fallback path: profile in,
/// offers out. Lets the HTTP layer be tested without the external API.
#[async_trait]
pub trait OfferFinder: Send + Sync {
    async fn find_offers(&self, profile: &Profile, max_results: usize) -> Result<Vec<JobOffer>>;
}

pub struct FranceTravailClient {
    http: reqwest::Client,
    config: FranceTravailConfig,
}

#[async_trait]
impl OfferFinder for FranceTravailClient {
    async fn find_offers(&self, profile: &Profile, max_results: usize) -> Result<Vec<JobOffer>> {
        FranceTravailClient::find_offers(self, profile, max_results).await
    }
}

impl FranceTravailClient {
    pub fn new(config: FranceTravailConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| JobscoutError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Exchange client credentials for a bearer token. Missing credentials
    /// are a fatal configuration error, never retried.
    pub async fn fetch_token(&self) -> Result<String> {
        let client_id = self.config.resolved_client_id();
        let client_secret = self.config.resolved_client_secret();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(JobscoutError::UpstreamAuth(
                "France Travail credentials not configured; set FRANCE_TRAVAIL_CLIENT_ID \
                 and FRANCE_TRAVAIL_CLIENT_SECRET"
                    .into(),
            ));
        }

        let response = self
            .http
            .post(&self.config.token_url)
            .timeout(std::time::Duration::from_secs(TOKEN_TIMEOUT_SECS))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| JobscoutError::Http(format!("France Travail token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(JobscoutError::UpstreamAuth(format!(
                "France Travail token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| JobscoutError::UpstreamAuth(format!("invalid token response: {e}")))?;
        Ok(token.access_token)
    }

    /// Full keyword-fallback search: acquire a token once, then run the
    /// planner's strategy sequence against the offers endpoint.
    pub async fn find_offers(&self, profile: &Profile, max_results: usize) -> Result<Vec<JobOffer>> {
        let token = self.fetch_token().await?;
        let strategies = planner::plan(profile);
        let search = AuthorizedSearch {
            client: self,
            token,
        };
        planner::execute(&strategies, &search, max_results).await
    }

    /// One search round trip with an already-acquired token.
    async fn search_page(
        &self,
        token: &str,
        keyword: Option<&str>,
        max_results: usize,
    ) -> Result<SearchOutcome> {
        let mut request = self
            .http
            .get(&self.config.api_url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .query(&[
                ("range", format!("0-{}", max_results.saturating_sub(1))),
                // Sort by creation date, newest first.
                ("sort", "1".to_string()),
            ]);

        if let Some(keyword) = keyword {
            request = request.query(&[("motsCles", keyword)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| JobscoutError::Http(format!("France Travail search failed: {e}")))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response
            .text()
            .await
            .map_err(|e| JobscoutError::Http(format!("France Travail read failed: {e}")))?;

        classify_response(status, &content_type, &body)
    }
}

/// Classify a raw search response into the planner's tagged outcome.
fn classify_response(status: StatusCode, content_type: &str, body: &str) -> Result<SearchOutcome> {
    if status == StatusCode::NO_CONTENT {
        return Ok(SearchOutcome::SoftEmpty);
    }

    if !content_type.contains("application/json") {
        return Ok(SearchOutcome::Malformed(format!(
            "non-JSON response (status {status}, content-type '{content_type}')"
        )));
    }

    if !status.is_success() {
        return Err(JobscoutError::Http(format!(
            "France Travail search returned {status}: {}",
            body.chars().take(200).collect::<String>()
        )));
    }

    match serde_json::from_str::<SearchResponse>(body) {
        Ok(parsed) => Ok(SearchOutcome::Offers(
            parsed.resultats.into_iter().map(WireOffer::into_offer).collect(),
        )),
        Err(e) => Ok(SearchOutcome::Malformed(format!("invalid JSON body: {e}"))),
    }
}

struct AuthorizedSearch<'a> {
    client: &'a FranceTravailClient,
    token: String,
}

#[async_trait]
impl OfferSearch for AuthorizedSearch<'_> {
    async fn search(&self, keyword: Option<&str>, max_results: usize) -> Result<SearchOutcome> {
        self.client.search_page(&self.token, keyword, max_results).await
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    resultats: Vec<WireOffer>,
}

#[derive(Debug, Deserialize)]
struct WireOffer {
    #[serde(default)]
    intitule: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "lieuTravail")]
    lieu_travail: Option<WirePlace>,
    #[serde(default)]
    entreprise: Option<WireCompany>,
    #[serde(default, rename = "typeContrat")]
    type_contrat: String,
    #[serde(default, rename = "typeContratLibelle")]
    type_contrat_libelle: String,
    #[serde(default, rename = "origineOffre")]
    origine_offre: Option<WireOrigin>,
    #[serde(default, rename = "dateCreation")]
    date_creation: String,
}

#[derive(Debug, Deserialize)]
struct WirePlace {
    #[serde(default)]
    libelle: String,
}

#[derive(Debug, Deserialize)]
struct WireCompany {
    #[serde(default)]
    nom: String,
}

#[derive(Debug, Deserialize)]
struct WireOrigin {
    #[serde(default, rename = "urlOrigine")]
    url_origine: String,
}

impl WireOffer {
    fn into_offer(self) -> JobOffer {
        // The human-readable contract label falls back to the raw code.
        let contract_type = if self.type_contrat_libelle.is_empty() {
            self.type_contrat
        } else {
            self.type_contrat_libelle
        };

        JobOffer {
            title: self.intitule,
            company: self.entreprise.map(|e| e.nom).unwrap_or_default(),
            location: self.lieu_travail.map(|l| l.libelle).unwrap_or_default(),
            contract_type,
            description: self.description,
            apply_url: self.origine_offre.map(|o| o.url_origine).unwrap_or_default(),
            created_at: self.date_creation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER_JSON: &str = r#"{
        "resultats": [
            {
                "intitule": "Développeur Rust",
                "description": "Backend services",
                "lieuTravail": { "libelle": "75 - PARIS" },
                "entreprise": { "nom": "Acme" },
                "typeContrat": "CDI",
                "typeContratLibelle": "Contrat à durée indéterminée",
                "origineOffre": { "urlOrigine": "https://example.com/1" },
                "dateCreation": "2026-01-15T08:00:00.000Z"
            },
            {
                "intitule": "Data Engineer"
            }
        ]
    }"#;

    #[test]
    fn test_classify_no_content_is_soft_empty() {
        let outcome =
            classify_response(StatusCode::NO_CONTENT, "application/json", "").unwrap();
        assert!(matches!(outcome, SearchOutcome::SoftEmpty));
    }

    #[test]
    fn test_classify_html_body_is_malformed() {
        let outcome = classify_response(
            StatusCode::OK,
            "text/html; charset=utf-8",
            "<html>maintenance</html>",
        )
        .unwrap();
        assert!(matches!(outcome, SearchOutcome::Malformed(_)));
    }

    #[test]
    fn test_classify_invalid_json_is_malformed() {
        let outcome =
            classify_response(StatusCode::OK, "application/json", "{ truncated").unwrap();
        assert!(matches!(outcome, SearchOutcome::Malformed(_)));
    }

    #[test]
    fn test_classify_server_error_is_hard_failure() {
        let err = classify_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "application/json",
            "{\"error\": \"boom\"}",
        )
        .unwrap_err();
        assert!(matches!(err, JobscoutError::Http(_)));
    }

    #[test]
    fn test_classify_parses_offers_with_sparse_fields() {
        let outcome =
            classify_response(StatusCode::OK, "application/json", OFFER_JSON).unwrap();
        let SearchOutcome::Offers(offers) = outcome else {
            panic!("expected offers");
        };
        assert_eq!(offers.len(), 2);

        assert_eq!(offers[0].title, "Développeur Rust");
        assert_eq!(offers[0].company, "Acme");
        assert_eq!(offers[0].location, "75 - PARIS");
        assert_eq!(offers[0].contract_type, "Contrat à durée indéterminée");
        assert_eq!(offers[0].apply_url, "https://example.com/1");

        // Sparse record: everything defaults to empty.
        assert_eq!(offers[1].title, "Data Engineer");
        assert_eq!(offers[1].company, "");
        assert_eq!(offers[1].contract_type, "");
    }

    #[test]
    fn test_classify_missing_resultats_field_is_empty_success() {
        let outcome = classify_response(StatusCode::OK, "application/json", "{}").unwrap();
        let SearchOutcome::Offers(offers) = outcome else {
            panic!("expected offers");
        };
        assert!(offers.is_empty());
    }

    #[test]
    fn test_contract_label_falls_back_to_code() {
        let wire: WireOffer = serde_json::from_str(r#"{"typeContrat": "MIS"}"#).unwrap();
        assert_eq!(wire.into_offer().contract_type, "MIS");
    }
}
