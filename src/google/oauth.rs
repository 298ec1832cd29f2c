//! Service account authentication for Google APIs using the JWT
//! bearer grant. The signed assertion is exchanged for a short lived
//! access token which is cached until shortly before it expires.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::google_error_message;

pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: Option<String>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

pub struct ServiceAccountAuth {
    client: Client,
    email: String,
    key: EncodingKey,
    token_url: String,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Parses the PEM encoded private key. Nothing is sent over the
    /// network until the first token is requested.
    pub fn new(client: Client, email: &str, private_key_pem: &str, token_url: &str) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .context("Invalid service account private key")?;

        Ok(Self {
            client,
            email: email.to_string(),
            key,
            token_url: token_url.to_string(),
            scope: CALENDAR_SCOPE.to_string(),
            cached: Mutex::new(None),
        })
    }

    fn signed_assertion(&self) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.email,
            scope: &self.scope,
            aud: &self.token_url,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .context("Failed to sign service account assertion")
    }

    /// Exchange a fresh assertion for an access token, bypassing the cache.
    pub async fn fetch_token(&self) -> Result<AccessTokenResponse> {
        let assertion = self.signed_assertion()?;
        let resp = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = google_error_message(&body).unwrap_or_else(|| body.clone());
            return Err(anyhow!("Token request failed ({}): {}", status, message));
        }

        serde_json::from_str(&body).context("Failed to parse access token response")
    }

    /// Returns a cached access token or fetches a new one.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && Instant::now() < token.refresh_at
        {
            return Ok(token.access_token.clone());
        }

        let resp = self.fetch_token().await?;
        tracing::debug!("Fetched service account token, expires in {}s", resp.expires_in);
        let lifetime = Duration::from_secs(resp.expires_in).saturating_sub(EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            access_token: resp.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(resp.access_token)
    }
}
