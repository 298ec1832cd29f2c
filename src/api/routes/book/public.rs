//! Public types for the booking API
use serde::{Deserialize, Serialize};

pub use crate::booking::BookingRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
