use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::{EventDescription, TimeWindow};

pub const DEFAULT_DURATION_MINUTES: f64 = 45.0;
pub const MEETING_LOCATION: &str = "Google Meet / Phone call";

/// Inbound booking payload. Wire names are the Spanish keys clients
/// already send; the English names are accepted as aliases.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "nombre", alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "telefono", alias = "phone")]
    pub phone: Option<String>,
    #[serde(rename = "fecha", alias = "date")]
    pub date: Option<String>,
    /// Fractional minutes are kept, `30.5` adds thirty seconds
    #[serde(rename = "duracionMin", alias = "durationMinutes")]
    pub duration_minutes: Option<f64>,
    #[serde(rename = "notas", alias = "notes")]
    pub notes: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid date format")]
    InvalidDate,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl BookingRequest {
    /// Validate the payload and turn it into the event that gets sent
    /// to the calendar provider.
    pub fn into_event(self, tz: Tz) -> Result<EventDescription, BookingError> {
        let (Some(name), Some(phone), Some(date)) = (
            present(&self.name),
            present(&self.phone),
            present(&self.date),
        ) else {
            return Err(BookingError::MissingFields);
        };

        let start = parse_iso_in_zone(date, tz).ok_or(BookingError::InvalidDate)?;
        let minutes = self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        let window = TimeWindow::from_duration(start, minutes).ok_or(BookingError::InvalidDate)?;

        let notes = self.notes.as_deref().unwrap_or_default();
        let attendees = present(&self.email)
            .map(|email| vec![email.to_string()])
            .unwrap_or_default();

        Ok(EventDescription {
            title: format!("Appointment with {}", name),
            description: format!("Client: {}\nPhone: {}\nNotes: {}", name, phone, notes),
            window,
            location: MEETING_LOCATION.to_string(),
            attendees,
        })
    }
}

// Extended and basic ISO-8601 forms. `%z` accepts `+hh:mm` and `+hhmm`.
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y%m%dT%H%M%S%.f%z",
    "%Y%m%dT%H%M%z",
];
const LOCAL_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Comma fractions become dots and a `Z` suffix becomes `+00:00` so
/// the formats above cover both.
fn normalize_iso(input: &str) -> String {
    let input = input.replace(',', ".");
    match input.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+00:00", rest),
        None => input,
    }
}

fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            // Hour-only times (`2025-06-01T10`, `20250601T10`) need minutes for chrono
            let (_, time) = input.split_once('T')?;
            if time.len() != 2 || !time.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let sep = if input.contains('-') { ":" } else { "" };
            let padded = format!("{}{}00", input, sep);
            LOCAL_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&padded, fmt).ok())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse an ISO-8601 timestamp in `tz`. Inputs with an explicit
/// offset are converted into `tz`; bare dates mean midnight.
pub fn parse_iso_in_zone(input: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let input = normalize_iso(input);

    if let Some(dt) = DateTime::parse_from_rfc3339(&input).ok().or_else(|| {
        OFFSET_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(&input, fmt).ok())
    }) {
        return Some(dt.with_timezone(&tz));
    }

    let naive = parse_naive(&input)?;

    // Fall-back transitions pick the earlier instant, gaps shift forward
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(chrono::Duration::hours(1))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}
