use std::sync::Arc;

use crate::booking::EventCreator;
use crate::core::AppConfig;

/// Read-only state shared by every request.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub events: Arc<dyn EventCreator>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, events: Arc<dyn EventCreator>) -> Self {
        Self { config, events }
    }
}
