use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use engine::{AffectedDocuments, Config, Document, SearchEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct KeywordsRequest {
    pub keywords: Vec<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<Document>,
}

#[derive(Serialize)]
pub struct PurgeResponse {
    pub survivors: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub terms: usize,
    pub pending_tombstones: usize,
    pub loaded_at: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub admin_token: Option<String>,
    pub loaded_at: String,
}

/// Load the corpus from `config` and wire up routes. Loading finishes before
/// the router exists, so nothing is served from a half-built index.
pub fn build_app(config: &Config) -> Result<Router> {
    let (engine, report) = SearchEngine::load(config.engine.clone())?;
    tracing::info!(
        documents = report.documents,
        files_loaded = report.files_loaded,
        files_failed = report.files_failed,
        "index ready"
    );
    let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
    Ok(router(Arc::new(engine), admin_token))
}

pub fn router(engine: Arc<SearchEngine>, admin_token: Option<String>) -> Router {
    let loaded_at = time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    let app_state = AppState { engine, admin_token, loaded_at };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/search", get(search_query).post(search_body))
        .route("/document", delete(delete_documents))
        .route("/purge", post(purge))
        .route("/stats", get(stats))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

/// GET form of search. Keywords come from every `q` parameter, each split on
/// whitespace, so `?q=two+document` and `?q=two&q=document` are the same query.
pub async fn search_query(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<SearchResponse> {
    let keywords: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "q")
        .flat_map(|(_, value)| value.split_whitespace())
        .collect();
    Json(SearchResponse { results: state.engine.search(keywords.as_slice()) })
}

pub async fn search_body(State(state): State<AppState>, Json(req): Json<KeywordsRequest>) -> Json<SearchResponse> {
    Json(SearchResponse { results: state.engine.search(req.keywords.as_slice()) })
}

pub async fn delete_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<KeywordsRequest>,
) -> Result<Json<AffectedDocuments>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    Ok(Json(state.engine.delete(req.keywords.as_slice())))
}

pub async fn purge(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<PurgeResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    Ok(Json(PurgeResponse { survivors: state.engine.purge() }))
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let s = state.engine.stats();
    Json(StatsResponse {
        documents: s.documents,
        terms: s.terms,
        pending_tombstones: s.pending_tombstones,
        loaded_at: state.loaded_at.clone(),
    })
}

/// Mutating routes are open unless `ADMIN_TOKEN` is set, in which case the
/// `X-ADMIN-TOKEN` header must match it.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let Some(required) = &state.admin_token else {
        return Ok(());
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
