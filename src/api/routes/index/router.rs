//! Router for the liveness check

use std::sync::Arc;

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn index_handler() -> &'static str {
    "Booking gateway is running"
}

pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(index_handler))
}
