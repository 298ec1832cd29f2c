//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::Request;
use axum::response::Response;
use serde_json::Value;

use booking_gateway::api::{AppState, app};
use booking_gateway::booking::{EventCreator, EventDescription, EventResult};
use booking_gateway::core::AppConfig;

pub const TEST_API_KEY: &str = "test-booking-key";
pub const TEST_LINK: &str = "https://www.google.com/calendar/event?eid=test_event";

/// Records every event it is asked to create instead of calling
/// Google. Fails every call when built with `failing`.
#[derive(Default)]
pub struct StubEventCreator {
    calls: AtomicUsize,
    last: Mutex<Option<EventDescription>>,
    failure: Option<String>,
}

impl StubEventCreator {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_event(&self) -> Option<EventDescription> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventCreator for StubEventCreator {
    async fn create(&self, event: &EventDescription) -> Result<EventResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(event.clone());

        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }

        Ok(EventResult {
            id: Some(String::from("test_event")),
            html_link: Some(String::from(TEST_LINK)),
            status: Some(String::from("confirmed")),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        calendar_id: String::from("test@group.calendar.google.com"),
        service_account_email: String::from("bot@test.iam.gserviceaccount.com"),
        service_account_private_key: String::from("unused"),
        api_key: String::from(TEST_API_KEY),
        timezone: chrono_tz::America::Mexico_City,
        port: String::from("3000"),
        google_api_base_url: String::from("http://localhost:9"),
        google_token_url: String::from("http://localhost:9/token"),
    }
}

/// Creates a test application router backed by `events`.
pub fn test_app(events: Arc<StubEventCreator>) -> Router {
    let app_state = AppState::new(Arc::new(test_config()), events);
    app(Arc::new(app_state))
}

pub fn book_request(api_key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri("/book")
        .method("POST")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
