mod config;
pub use config::AppConfig;
pub use config::{
    DEFAULT_GOOGLE_API_BASE_URL, DEFAULT_GOOGLE_TOKEN_URL, DEFAULT_PORT, DEFAULT_TIMEZONE,
};
