//! # API REST
//!
//! REST API implementation for DiaLens.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - In-memory session storage
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `dialens-core` for the assessment itself.

#![warn(rust_2018_idioms)]

mod convert;
mod error;
pub mod handlers;
pub mod sessions;

use axum::{
    routing::{get, post, put},
    Router,
};
use dialens_core::{CoreConfig, Models};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;
pub use sessions::SessionStore;

/// Application state shared across REST API handlers
///
/// Configuration and models are immutable after startup. Sessions are the only mutable
/// state, and each one is isolated behind its own lock.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub models: Arc<Models>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, models: Arc<Models>) -> Self {
        let sessions = SessionStore::new(cfg.session_ttl());
        Self {
            cfg,
            models,
            sessions,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::create_session,
        handlers::get_session,
        handlers::delete_session,
        handlers::start_session,
        handlers::update_answers,
        handlers::submit_answers,
        handlers::return_home,
        handlers::edit_answers,
        handlers::get_results,
        handlers::get_world_map,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::AnswersDto,
        api_shared::UpdateAnswersReq,
        api_shared::UpdateAnswersRes,
        api_shared::SessionRes,
        api_shared::LabWarningDto,
        api_shared::PredictionDto,
        api_shared::RecommendationDto,
        api_shared::GlobalFactsDto,
        api_shared::LegendEntryDto,
        api_shared::MapRegionDto,
        api_shared::WorldMapRes,
        api_shared::ResultsRes,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/:id/start", post(handlers::start_session))
        .route("/sessions/:id/answers", put(handlers::update_answers))
        .route("/sessions/:id/submit", post(handlers::submit_answers))
        .route("/sessions/:id/home", post(handlers::return_home))
        .route("/sessions/:id/edit", post(handlers::edit_answers))
        .route("/sessions/:id/results", get(handlers::get_results))
        .route("/map", get(handlers::get_world_map))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
