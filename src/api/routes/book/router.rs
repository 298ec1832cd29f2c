//! Router for the booking API

use std::sync::Arc;

use axum::body::Bytes;
use axum::{Json, Router, extract::State, middleware};
use http::{HeaderMap, header};

use super::public::{BookingRequest, BookingResponse};
use crate::api::auth::require_api_key;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// A body that is empty or not declared as JSON is read as an empty
/// booking so validation reports the missing fields. Declared JSON
/// that does not parse is rejected.
fn parse_booking(headers: &HeaderMap, body: &Bytes) -> Result<BookingRequest, ApiError> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BookingRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

async fn book_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BookingResponse>, ApiError> {
    let payload = parse_booking(&headers, &body)?;
    let event = payload.into_event(state.config.timezone)?;

    tracing::debug!(
        "Booking {} from {} to {}",
        event.title,
        event.window.start.to_rfc3339(),
        event.window.end.to_rfc3339()
    );

    let created = state.events.create(&event).await.map_err(ApiError::Remote)?;

    Ok(Json(BookingResponse {
        ok: true,
        link: created.html_link,
    }))
}

/// Create the booking router. Every route here requires the API key.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::post(book_handler))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}
