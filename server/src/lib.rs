use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use plotmatch_core::{build_index, DocId, Recommendation, SharedIndex, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};

pub mod corpus;

use corpus::load_corpus;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_N }

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Recommendation>,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus_path: PathBuf,
    pub index: SharedIndex,
    pub admin_token: Option<String>,
}

/// Load the corpus CSV, build the index, and wire up the router.
pub fn build_app(corpus_path: impl Into<PathBuf>) -> Result<Router> {
    let corpus_path = corpus_path.into();
    let index = SharedIndex::empty();
    index.install(build_index(load_corpus(&corpus_path)?)?);
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState { corpus_path, index, admin_token };

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

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .route("/movie/:movie_id", get(movie_handler))
        .route("/admin/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors);
    Ok(app)
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let k = params.k.min(100);
    let results = state
        .index
        .recommend(&params.q, k)
        .map_err(|err| (StatusCode::SERVICE_UNAVAILABLE, err.to_string()))?;
    Ok(Json(RecommendResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        results,
    }))
}

pub async fn movie_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let index = state
        .index
        .get()
        .map_err(|err| (StatusCode::SERVICE_UNAVAILABLE, err.to_string()))?;
    if let Some(movie) = index.movie(movie_id) {
        return Ok(Json(serde_json::json!({
            "movie_id": movie_id,
            "title": movie.title,
            "overview": movie.overview,
            "poster_url": movie.poster_url,
        })));
    }
    Err((StatusCode::NOT_FOUND, "not found".into()))
}

/// Re-read the corpus file and atomically swap in a fresh index.
pub async fn rebuild_handler(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let movies = load_corpus(&state.corpus_path)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    let index = build_index(movies)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    let (num_docs, num_terms) = (index.num_docs(), index.num_terms());
    state.index.install(index);
    tracing::info!(num_docs, num_terms, "index rebuilt");
    Ok(Json(serde_json::json!({ "num_docs": num_docs, "num_terms": num_terms })))
}

fn authorize(state: &AppState, headers: &axum::http::HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
