//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - LocationLookup: search-as-you-type location resolution
//! - ItinerarySearch: itinerary queries between two resolved locations
//!
//! Services depend only on these traits, so the provider client can be
//! replaced by scripted fakes in tests.

pub mod itinerary_search;
pub mod location_lookup;

pub use itinerary_search::ItinerarySearch;
pub use location_lookup::{LocationLookup, LookupResponse};
