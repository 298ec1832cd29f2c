//! Google Calendar v3 client for creating events

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::google_error_message;
use super::oauth::ServiceAccountAuth;
use crate::booking::{EventCreator, EventDescription, EventResult};
use crate::core::AppConfig;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EventAttendee {
    pub email: String,
}

/// Request body for `events.insert`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub location: String,
    pub attendees: Vec<EventAttendee>,
}

impl CalendarEvent {
    pub fn from_description(event: &EventDescription, tz: Tz) -> Self {
        let time_zone = tz.name().to_string();
        Self {
            summary: event.title.clone(),
            description: event.description.clone(),
            start: EventDateTime {
                date_time: event.window.start.to_rfc3339(),
                time_zone: time_zone.clone(),
            },
            end: EventDateTime {
                date_time: event.window.end.to_rfc3339(),
                time_zone,
            },
            location: event.location.clone(),
            attendees: event
                .attendees
                .iter()
                .map(|email| EventAttendee {
                    email: email.clone(),
                })
                .collect(),
        }
    }
}

/// Handle to one calendar, authenticated as a service account.
pub struct GoogleCalendar {
    client: Client,
    auth: ServiceAccountAuth,
    api_base_url: String,
    calendar_id: String,
    timezone: Tz,
}

impl GoogleCalendar {
    pub fn connect(config: &AppConfig) -> Result<Self> {
        let client = Client::new();
        let auth = ServiceAccountAuth::new(
            client.clone(),
            &config.service_account_email,
            &config.service_account_private_key,
            &config.google_token_url,
        )?;

        Ok(Self {
            client,
            auth,
            api_base_url: config.google_api_base_url.trim_end_matches('/').to_string(),
            calendar_id: config.calendar_id.clone(),
            timezone: config.timezone,
        })
    }

    pub fn auth(&self) -> &ServiceAccountAuth {
        &self.auth
    }

    /// Insert an event and ask Google to email every attendee.
    pub async fn insert_event(&self, event: &CalendarEvent) -> Result<EventResult> {
        let access_token = self.auth.access_token().await?;
        let url = format!(
            "{}/calendar/v3/calendars/{}/events",
            self.api_base_url,
            urlencoding::encode(&self.calendar_id)
        );

        let resp = self
            .client
            .post(&url)
            .query(&[("sendUpdates", "all")])
            .bearer_auth(access_token)
            .json(event)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(match google_error_message(&body) {
                Some(message) => anyhow!(message),
                None => anyhow!("Calendar request failed with status {}", status),
            });
        }

        serde_json::from_str(&body).context("Failed to parse created event")
    }
}

#[async_trait]
impl EventCreator for GoogleCalendar {
    async fn create(&self, event: &EventDescription) -> Result<EventResult> {
        let body = CalendarEvent::from_description(event, self.timezone);
        let created = self.insert_event(&body).await?;
        tracing::info!(
            "Created event {} on calendar {}",
            created.id.as_deref().unwrap_or("<unknown>"),
            self.calendar_id
        );
        Ok(created)
    }
}
