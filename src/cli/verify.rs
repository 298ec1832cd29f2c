use anyhow::Result;

use crate::core::AppConfig;
use crate::google::GoogleCalendar;

pub async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let calendar = GoogleCalendar::connect(&config)?;
    let token = calendar.auth().fetch_token().await?;

    println!(
        "Service account {} authorized for calendar {}. Token expires in {}s.",
        config.service_account_email, config.calendar_id, token.expires_in
    );
    Ok(())
}
