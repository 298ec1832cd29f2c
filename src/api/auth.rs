use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::public::ApiError;
use super::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject any request whose `x-api-key` header does not exactly match
/// the configured key. Runs before the body is read.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|val| val.to_str().ok());

    if provided != Some(state.config.api_key.as_str()) {
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
