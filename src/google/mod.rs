pub mod gcal;
pub mod oauth;

pub use gcal::GoogleCalendar;

use serde_json::Value;

/// Pull a human readable message out of a Google error body. API
/// errors nest it under `error.message`, the token endpoint uses
/// `error_description`.
pub(crate) fn google_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;

    error
        .get("message")
        .or_else(|| value.get("error_description"))
        .or(Some(error))
        .and_then(Value::as_str)
        .map(str::to_string)
}
