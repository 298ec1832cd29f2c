use std::env;

use anyhow::{Result, anyhow};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_GOOGLE_API_BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub calendar_id: String,
    pub service_account_email: String,
    pub service_account_private_key: String,
    pub api_key: String,
    pub timezone: Tz,
    pub port: String,
    pub google_api_base_url: String,
    pub google_token_url: String,
}

impl AppConfig {
    /// Load the configuration from the process environment. Fails
    /// when a credential or the booking API key is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|val| !val.is_empty())
                .ok_or_else(|| anyhow!("Missing env var {}", key))
        };

        let calendar_id = required("GOOGLE_CALENDAR_ID")?;
        let service_account_email = required("GOOGLE_SERVICE_ACCOUNT_EMAIL")?;
        // Keys pasted into a single-line env var carry escaped newlines
        let service_account_private_key =
            required("GOOGLE_PRIVATE_KEY")?.replace("\\n", "\n");
        let api_key = required("BOOKING_API_KEY")?;

        let timezone_name = lookup("TZ").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| anyhow!("Unknown timezone in TZ: {}", timezone_name))?;

        let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let google_api_base_url = lookup("GOOGLE_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GOOGLE_API_BASE_URL.to_string());
        let google_token_url =
            lookup("GOOGLE_TOKEN_URL").unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.to_string());

        Ok(Self {
            calendar_id,
            service_account_email,
            service_account_private_key,
            api_key,
            timezone,
            port,
            google_api_base_url,
            google_token_url,
        })
    }
}
