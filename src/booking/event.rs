use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Start and end of a booked slot, both in the configured zone.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    /// Returns `None` when the end falls outside chrono's representable
    /// range. Non-positive durations are passed through as-is. Minutes
    /// are rounded to the millisecond.
    pub fn from_duration(start: DateTime<Tz>, minutes: f64) -> Option<Self> {
        let millis = (minutes * 60_000.0).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }
        let duration = Duration::try_milliseconds(millis as i64)?;
        let end = start.checked_add_signed(duration)?;
        Some(Self { start, end })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventDescription {
    pub title: String,
    pub description: String,
    pub window: TimeWindow,
    pub location: String,
    pub attendees: Vec<String>,
}

/// What the provider sent back after creating the event. Only
/// `html_link` is surfaced to callers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventResult {
    pub id: Option<String>,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
    pub status: Option<String>,
}

/// Creates one calendar event per call. Implementations make a
/// single attempt and return the provider's error as-is on failure.
#[async_trait]
pub trait EventCreator: Send + Sync {
    async fn create(&self, event: &EventDescription) -> Result<EventResult>;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::Mexico_City;

    use super::*;

    #[test]
    fn it_computes_end_from_duration() {
        let start = Mexico_City
            .with_ymd_and_hms(2025, 6, 1, 10, 0, 0)
            .unwrap();
        let window = TimeWindow::from_duration(start, 45.0).unwrap();
        assert_eq!(
            window.end,
            Mexico_City.with_ymd_and_hms(2025, 6, 1, 10, 45, 0).unwrap()
        );
        assert!(window.end > window.start);
    }

    #[test]
    fn it_crosses_midnight() {
        let start = Mexico_City
            .with_ymd_and_hms(2025, 6, 1, 23, 30, 0)
            .unwrap();
        let window = TimeWindow::from_duration(start, 90.0).unwrap();
        assert_eq!(
            window.end,
            Mexico_City.with_ymd_and_hms(2025, 6, 2, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn it_keeps_fractional_minutes() {
        let start = Mexico_City
            .with_ymd_and_hms(2025, 6, 1, 10, 0, 0)
            .unwrap();
        let window = TimeWindow::from_duration(start, 0.5).unwrap();
        assert_eq!(
            window.end,
            Mexico_City.with_ymd_and_hms(2025, 6, 1, 10, 0, 30).unwrap()
        );
    }

    #[test]
    fn it_passes_through_non_positive_durations() {
        let start = Mexico_City
            .with_ymd_and_hms(2025, 6, 1, 10, 0, 0)
            .unwrap();
        let window = TimeWindow::from_duration(start, 0.0).unwrap();
        assert_eq!(window.start, window.end);

        let window = TimeWindow::from_duration(start, -15.0).unwrap();
        assert!(window.end < window.start);
    }

    #[test]
    fn it_rejects_overflowing_durations() {
        let start = Mexico_City
            .with_ymd_and_hms(2025, 6, 1, 10, 0, 0)
            .unwrap();
        assert!(TimeWindow::from_duration(start, f64::MAX).is_none());
        assert!(TimeWindow::from_duration(start, f64::NAN).is_none());
        assert!(TimeWindow::from_duration(start, 1e15).is_none());
    }
}
