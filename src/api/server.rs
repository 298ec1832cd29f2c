use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::google::GoogleCalendar;

pub fn app(shared_state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::router(Arc::clone(&shared_state)))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(config);

    // Credentials are checked once here, the calendar handle lives
    // for the rest of the process
    let calendar = GoogleCalendar::connect(&config)?;
    let app_state = AppState::new(Arc::clone(&config), Arc::new(calendar));
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, config.port))?;

    tracing::info!(
        "Server started. Listening on {} (timezone {})",
        listener.local_addr()?,
        config.timezone.name()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
