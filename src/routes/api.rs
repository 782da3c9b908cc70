//! Read-only JSON API endpoints.

use crate::db::entries::{self, FetchOptions};
use crate::db::users;
use crate::errors::Error;
use crate::routes::{AppState, not_found};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use rand::seq::SliceRandom;
use tracing::warn;

/// Get a random listed entry.
///
/// GET /api/random.json
///
/// Fetches the full listed set before selecting; the skip window goes unused
/// here, exactly like the route this ports.
pub async fn random_entry(State(state): State<AppState>) -> Result<Response, Error> {
    let db = state.connector.database().await?;
    let found = entries::fetch_entries(db, FetchOptions { limit: 0, skip: 0 }).await?;
    Ok(match found.choose(&mut rand::thread_rng()) {
        Some(entry) => Json(entry).into_response(),
        None => not_found(),
    })
}

/// Get a user's public profile.
///
/// GET /api/user/:id (a `.json`-suffixed id segment is accepted too)
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    let id = id.strip_suffix(".json").unwrap_or(&id);
    let db = state.connector.database().await?;
    Ok(match users::fetch_user(db, id).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => not_found(),
        Err(Error::InvalidId(id)) => {
            warn!(%id, "User lookup with malformed id");
            not_found()
        }
        Err(err) => return Err(err),
    })
}
