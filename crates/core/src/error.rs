//! Typed errors raised while validating catalog data.

use thiserror::Error;

/// A catalog record that violates one of the data invariants.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two venues share an id.
    #[error("duplicate venue id {0}")]
    DuplicateVenueId(u32),
    /// Two events share an id.
    #[error("duplicate event id {0}")]
    DuplicateEventId(u32),
    /// A venue rating outside 0.0..=5.0.
    #[error("venue {id} has rating {rating} outside 0.0..=5.0")]
    RatingOutOfRange {
        /// Offending venue.
        id: u32,
        /// Rating as found in the data.
        rating: f64,
    },
    /// An event date that is not a valid `YYYY-MM-DD` calendar date.
    #[error("event {id} has malformed date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Offending event.
        id: u32,
        /// Date string as found in the data.
        value: String,
    },
    /// An event time that is not a valid 24-hour `HH:MM` string.
    #[error("event {id} has malformed time '{value}' (expected HH:MM)")]
    InvalidTime {
        /// Offending event.
        id: u32,
        /// Time string as found in the data.
        value: String,
    },
    /// An event with no capacity.
    #[error("event {0} has zero capacity")]
    ZeroCapacity(u32),
}
