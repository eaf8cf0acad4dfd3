//! Route handlers.
//!
//! Two user-visible outcomes are kept strictly apart everywhere: "nothing
//! relevant found" is a successful response, while collaborator failures are
//! explicit errors with a cause and a matching status code.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use jobscout_core::error::JobscoutError;
use jobscout_core::types::FormattedOffer;
use jobscout_jobs::profile::extract_profile;
use jobscout_retrieval::format::{DocumentSource, format_hits, format_offers, hit_context, offer_context};
use jobscout_retrieval::retrieve;

use crate::prompts;
use crate::server::AppState;

/// Minimum résumé length worth processing.
const MIN_CV_CHARS: usize = 50;

// --- Error mapping ---

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<JobscoutError> for ApiError {
    fn from(err: JobscoutError) -> Self {
        let status = match &err {
            JobscoutError::Extraction(_) => StatusCode::BAD_REQUEST,
            JobscoutError::UpstreamFormat(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, detail = %self.detail, "request failed");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

// --- Request/response models ---

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<DocumentSource>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordSearchRequest {
    pub keywords: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Serialize)]
pub struct KeywordSearchResponse {
    pub sources: Vec<DocumentSource>,
}

#[derive(Debug, Serialize)]
pub struct CvAnalysisResponse {
    pub analysis: String,
    pub matching_offers: Vec<FormattedOffer>,
    pub profile_summary: String,
}

fn default_upload_top_k() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    #[serde(default = "default_upload_top_k")]
    pub top_k: usize,
}

// --- Handlers ---

/// Liveness endpoint.
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "jobscout" }))
}

/// Per-collaborator health report.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let store_status = match state.store.list_collections().await {
        Ok(_) => "healthy".to_string(),
        Err(e) => format!("unhealthy: {e}"),
    };
    let llm_status = match state.generator.health_check().await {
        Ok(true) => "healthy".to_string(),
        Ok(false) => "unhealthy".to_string(),
        Err(e) => format!("unhealthy: {e}"),
    };

    Json(json!({
        "vector_store": store_status,
        "llm": llm_status,
        "embedding_model": state.config.embedding.model,
    }))
}

/// Answer a question grounded in the indexed documents.
pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let hits = retrieve(
        &request.question,
        request.top_k,
        &state.config.index.document_collection,
        state.embedder.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    if hits.is_empty() {
        return Err(ApiError::not_found("No relevant documents found"));
    }

    let context = hit_context(&hits);
    let sources = format_hits(&hits);

    let prompt = prompts::answer_prompt(&context, &request.question);
    let answer = state.generator.generate(&prompt, 0.7, 500).await?;

    Ok(Json(QueryResponse { answer, sources }))
}

/// Semantic search without generation. Sources carry the full chunk text.
pub async fn keyword_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KeywordSearchRequest>,
) -> Result<Json<KeywordSearchResponse>, ApiError> {
    let hits = retrieve(
        &request.keywords,
        request.top_k,
        &state.config.index.document_collection,
        state.embedder.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    if hits.is_empty() {
        return Err(ApiError::not_found("No relevant documents found"));
    }

    let sources = hits
        .iter()
        .map(|hit| DocumentSource {
            source_id: hit.payload["source_id"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            chunk_index: hit.payload["chunk_index"].as_u64().unwrap_or(0),
            score: hit.score,
            text: hit.payload["text"].as_str().unwrap_or("").to_string(),
        })
        .collect();

    Ok(Json(KeywordSearchResponse { sources }))
}

/// Statistics about the document collection.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let info = state
        .store
        .get_collection_info(&state.config.index.document_collection)
        .await?;

    Ok(Json(json!({
        "collection_name": info.name,
        "total_chunks": info.points_count,
        "vector_size": info.vector_size,
    })))
}

/// Upload a résumé and get matching job offers plus a generated analysis.
pub async fn upload_cv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<Json<CvAnalysisResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::bad_request("missing 'file' field in upload"))?;

    let cv_text = state.extractor.extract(&bytes, &filename)?;
    if cv_text.trim().chars().count() < MIN_CV_CHARS {
        return Err(ApiError::bad_request(
            "The CV appears empty or too short. Please check the file.",
        ));
    }

    let summary_prompt = prompts::profile_summary_prompt(&cv_text);
    let profile_summary = state.generator.generate(&summary_prompt, 0.3, 200).await?;

    let profile = extract_profile(state.generator.as_ref(), &cv_text).await;
    tracing::info!(role = %profile.role, skills = profile.skills.len(), "extracted profile");

    let offers = state.offers.find_offers(&profile, params.top_k).await?;

    if offers.is_empty() {
        return Ok(Json(CvAnalysisResponse {
            analysis: "No matching offers were found for this profile. \
                       Try broadening your search criteria."
                .into(),
            matching_offers: vec![],
            profile_summary,
        }));
    }

    let matching_offers = format_offers(&offers);
    let context_blocks = offer_context(&offers);

    let analysis_prompt = prompts::matching_analysis_prompt(&profile_summary, &context_blocks);
    let analysis = state.generator.generate(&analysis_prompt, 0.7, 800).await?;

    Ok(Json(CvAnalysisResponse {
        analysis,
        matching_offers,
        profile_summary,
    }))
}
