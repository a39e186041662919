//! Skyroute - search-as-you-type location lookup and itinerary search
//!
//! Skyroute resolves free text typed into a location field ("Lon") into a
//! canonical [`Location`] by querying a flight data provider while the user
//! types, and runs itinerary searches between two resolved locations.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): value types, error taxonomy and port traits
//! - **Service Layer** (`services`): debouncing, the race-safe suggestion
//!   session and the selection field built on it
//! - **Infrastructure Layer** (`infrastructure`): provider HTTP client,
//!   configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use skyroute::{LookupPolicy, ProviderClient, ProviderConfig, SelectionField};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ProviderClient::new(ProviderConfig {
//!         api_key: std::env::var("RAPIDAPI_KEY")?,
//!         ..Default::default()
//!     })?;
//!     let mut field = SelectionField::new("From", Arc::new(client), LookupPolicy::default());
//!     field.input("Lon");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{FailureClass, ProviderError, SearchFormError, SelectionError};
pub use domain::models::{
    CabinClass, Config, Itinerary, ItineraryQuery, Location, LookupRequest, ProviderConfig,
    QueryPhase, QueryState,
};
pub use domain::ports::{ItinerarySearch, LocationLookup, LookupResponse};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::provider::{ProviderApiError, ProviderClient};
pub use services::{
    FieldView, LookupPolicy, QueryDebouncer, QueryDispatch, Resolution, SearchForm,
    SelectionField, SessionSnapshot, SuggestionSession,
};
