//! HTTP API for the guidance service.
//!
//! REST endpoints for asking questions and inspecting service state. The
//! question endpoint accepts both POST with a JSON body and GET with query
//! parameters so simple clients can integrate without a JSON encoder.

use crate::config::Settings;
use crate::engine::GuidanceEngine;
use crate::error::SatsangError;
use crate::language::Language;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
pub struct AppState {
    pub engine: GuidanceEngine,
    pub settings: Settings,
}

/// Build the application router with permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(ask).get(ask_get))
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/config", get(config))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default)]
    language: Option<Language>,
}

/// Query-string variant. `question` defaults to empty so a missing
/// parameter gets the same 422 as an empty one.
#[derive(Deserialize)]
struct AskQuery {
    #[serde(default)]
    question: String,
    #[serde(default)]
    language: Option<Language>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    engine_mode: crate::engine::EngineMode,
    ai_provider: &'static str,
    model_name: Option<String>,
    chunk_count: usize,
}

#[derive(Serialize)]
struct LanguageInfo {
    code: &'static str,
    name: &'static str,
}

#[derive(Serialize)]
struct LanguagesResponse {
    languages: Vec<LanguageInfo>,
}

#[derive(Serialize)]
struct ConfigResponse {
    ai_provider: String,
    model_name: String,
    temperature: f32,
    top_k: usize,
    min_score: f32,
    supported_languages: Vec<&'static str>,
    default_language: &'static str,
    engine_mode: crate::engine::EngineMode,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    answer(state, &req.question, req.language).await
}

async fn ask_get(
    State(state): State<Arc<AppState>>,
    Query(req): Query<AskQuery>,
) -> impl IntoResponse {
    answer(state, &req.question, req.language).await
}

async fn answer(
    state: Arc<AppState>,
    question: &str,
    language: Option<Language>,
) -> axum::response::Response {
    match state.engine.ask(question, language).await {
        Ok(answer) => Json(answer).into_response(),
        Err(SatsangError::InvalidInput(msg)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse { error: msg }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "satsang",
        version: env!("CARGO_PKG_VERSION"),
        engine_mode: state.engine.mode(),
        ai_provider: state.engine.provider_name(),
        model_name: state.engine.model_name(),
        chunk_count: state.engine.chunk_count().await,
    })
}

async fn languages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(LanguagesResponse {
        languages: state
            .settings
            .language
            .supported
            .iter()
            .map(|l| LanguageInfo {
                code: l.code(),
                name: l.name(),
            })
            .collect(),
    })
}

/// Runtime configuration view. Never includes API keys.
async fn config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let settings = &state.settings;
    Json(ConfigResponse {
        ai_provider: settings.provider.kind.to_string(),
        model_name: settings.provider.model_name().to_string(),
        temperature: settings.provider.temperature,
        top_k: settings.retrieval.top_k,
        min_score: settings.retrieval.min_score,
        supported_languages: settings.language.supported.iter().map(|l| l.code()).collect(),
        default_language: settings.language.default.code(),
        engine_mode: state.engine.mode(),
    })
}
