//! HTTP layer - router assembly, shared state, and error mapping.

/// JSON API endpoints (random entry, user lookup).
pub mod api;
/// Discord interactions webhook endpoint.
pub mod interactions;

use crate::bot::commands::CommandRegistry;
use crate::bot::verify::InteractionVerifier;
use crate::config::AppConfig;
use crate::db::Connector;
use crate::errors::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{Router, get, post};
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<Connector>,
    pub config: Arc<AppConfig>,
    pub verifier: Arc<InteractionVerifier>,
    pub registry: Arc<CommandRegistry>,
}

/// Builds the complete application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/random.json", get(api::random_entry))
        .route("/api/user/:id", get(api::get_user))
        .route("/api/interactions", post(interactions::post_interaction))
        .with_state(state)
}

/// JSON 404 body shared by the read endpoints.
pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidId(_)
            | Error::UnknownInteractionType(_)
            | Error::MissingCustomId
            | Error::CommandNotFound(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
