//! Domain errors for the Skyroute lookup and itinerary search system.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Message shown when the provider throttles us.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Message shown when the provider rejects our credentials.
pub const UNAUTHORIZED_MESSAGE: &str = "API key is invalid or expired.";

/// Fallback message for a failed location lookup.
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to search airports. Please try again.";

/// Fallback message for a failed itinerary search.
pub const ITINERARY_FAILED_MESSAGE: &str = "Failed to search flights. Please try again.";

/// The three failure classes a provider call can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Provider signalled too many requests (HTTP 429).
    RateLimited,
    /// Provider rejected the credentials (HTTP 401/403).
    Unauthorized,
    /// Anything else: transport faults, timeouts, unexpected statuses.
    Unknown,
}

impl FailureClass {
    /// Stable snake_case name used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Unauthorized => "unauthorized",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which provider operation failed. Only affects the `Unknown` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOperation {
    /// Search-as-you-type location lookup.
    LocationLookup,
    /// Itinerary search between two locations.
    ItinerarySearch,
}

impl ProviderOperation {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::LocationLookup => LOOKUP_FAILED_MESSAGE,
            Self::ItinerarySearch => ITINERARY_FAILED_MESSAGE,
        }
    }
}

/// Rejected outcome of a provider call: exactly one failure class plus a
/// human-readable message suitable for the view.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProviderError {
    /// Which of the three failure classes applies.
    pub class: FailureClass,
    /// Message shown to the user.
    pub message: String,
}

impl ProviderError {
    /// Build the error for `class` with the canonical message for `operation`.
    pub fn new(class: FailureClass, operation: ProviderOperation) -> Self {
        let message = match class {
            FailureClass::RateLimited => RATE_LIMITED_MESSAGE,
            FailureClass::Unauthorized => UNAUTHORIZED_MESSAGE,
            FailureClass::Unknown => operation.fallback_message(),
        };
        Self {
            class,
            message: message.to_string(),
        }
    }

    /// Shorthand for [`FailureClass::RateLimited`].
    pub fn rate_limited(operation: ProviderOperation) -> Self {
        Self::new(FailureClass::RateLimited, operation)
    }

    /// Shorthand for [`FailureClass::Unauthorized`].
    pub fn unauthorized(operation: ProviderOperation) -> Self {
        Self::new(FailureClass::Unauthorized, operation)
    }

    /// Shorthand for [`FailureClass::Unknown`].
    pub fn unknown(operation: ProviderOperation) -> Self {
        Self::new(FailureClass::Unknown, operation)
    }
}

/// Errors raised when committing a suggestion as the field's value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The location is not in the latest suggestion list.
    #[error("Location {0} was never offered as a suggestion")]
    NotOffered(String),

    /// No ready suggestion at this index.
    #[error("No suggestion at position {0}")]
    NoSuchCandidate(usize),
}

/// Errors raised when an itinerary search form is submitted incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFormError {
    /// No origin has been selected.
    #[error("Origin airport is required")]
    MissingOrigin,

    /// No destination has been selected.
    #[error("Destination airport is required")]
    MissingDestination,

    /// No departure date was given.
    #[error("Departure date is required")]
    MissingDepartureDate,

    /// Adult count outside 1..=9.
    #[error("Passenger count must be between 1 and 9, got {0}")]
    InvalidPassengerCount(u8),

    /// Return date earlier than the departure date.
    #[error("Return date {ret} is before departure date {departure}")]
    ReturnBeforeDeparture {
        /// Departure date as entered.
        departure: String,
        /// Return date as entered.
        ret: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_and_unauthorized_messages_differ() {
        let limited = ProviderError::rate_limited(ProviderOperation::LocationLookup);
        let unauthorized = ProviderError::unauthorized(ProviderOperation::LocationLookup);
        assert_ne!(limited.message, unauthorized.message);
        assert_eq!(limited.to_string(), RATE_LIMITED_MESSAGE);
        assert_eq!(unauthorized.to_string(), UNAUTHORIZED_MESSAGE);
    }

    #[test]
    fn test_unknown_message_depends_on_operation() {
        let lookup = ProviderError::unknown(ProviderOperation::LocationLookup);
        let flights = ProviderError::unknown(ProviderOperation::ItinerarySearch);
        assert_eq!(lookup.class, FailureClass::Unknown);
        assert_eq!(lookup.message, LOOKUP_FAILED_MESSAGE);
        assert_eq!(flights.message, ITINERARY_FAILED_MESSAGE);
    }

    #[test]
    fn test_failure_class_display() {
        assert_eq!(FailureClass::RateLimited.to_string(), "rate_limited");
        assert_eq!(FailureClass::Unauthorized.to_string(), "unauthorized");
        assert_eq!(FailureClass::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_selection_error_display() {
        let err = SelectionError::NotOffered("95565050".to_string());
        assert_eq!(
            err.to_string(),
            "Location 95565050 was never offered as a suggestion"
        );
        assert_eq!(
            SelectionError::NoSuchCandidate(4).to_string(),
            "No suggestion at position 4"
        );
    }
}
