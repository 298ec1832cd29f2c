//! Booking requests and the calendar events derived from them

mod event;
mod request;

pub use event::{EventCreator, EventDescription, EventResult, TimeWindow};
pub use request::{
    BookingError, BookingRequest, DEFAULT_DURATION_MINUTES, MEETING_LOCATION, parse_iso_in_zone,
};
