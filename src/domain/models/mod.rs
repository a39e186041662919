//! Domain value types.

pub mod config;
pub mod itinerary;
pub mod location;
pub mod query;

pub use config::{Config, LoggingConfig, LookupConfig, ProviderConfig, SearchConfig};
pub use itinerary::{CabinClass, Itinerary, ItineraryQuery};
pub use location::Location;
pub use query::{LookupRequest, QueryPhase, QueryState};
