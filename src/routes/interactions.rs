//! Discord interactions webhook endpoint.

use crate::bot::BotContext;
use crate::bot::dispatch;
use crate::bot::interactions::Interaction;
use crate::errors::Error;
use crate::routes::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

const SIGNATURE_HEADER: &str = "x-signature-ed25519";
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Receive a Discord interaction.
///
/// POST /api/interactions
///
/// The signature is checked over the raw body bytes before any parsing;
/// unverifiable payloads are rejected with 401 and never reach the
/// dispatcher.
pub async fn post_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Error> {
    let signature = header(&headers, SIGNATURE_HEADER);
    let timestamp = header(&headers, TIMESTAMP_HEADER);
    if !state.verifier.verify(signature, timestamp, &body) {
        warn!("Rejected interaction with invalid signature");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid request signature" })),
        )
            .into_response());
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(err) => {
            warn!(%err, "Unparseable interaction payload");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "malformed interaction" })),
            )
                .into_response());
        }
    };

    let db = state.connector.database().await?;
    let ctx = BotContext::new(db.clone(), state.config.base_url.clone());
    match dispatch::handle_interaction(&ctx, &state.registry, interaction).await {
        Ok(response) => Ok(Json(response).into_response()),
        Err(
            err @ (Error::UnknownInteractionType(_)
            | Error::MissingCustomId
            | Error::CommandNotFound(_)),
        ) => {
            warn!(%err, "Interaction protocol violation");
            Err(err)
        }
        Err(err) => {
            error!(%err, "Interaction handler failed");
            Err(err)
        }
    }
}
