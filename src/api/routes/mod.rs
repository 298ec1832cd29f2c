//! API routes module

pub mod book;
mod index;

use std::sync::Arc;

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        // Liveness
        .merge(index::router())
        // Booking routes
        .nest("/book", book::router(state))
}
