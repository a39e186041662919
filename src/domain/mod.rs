//! Domain layer for Skyroute
//!
//! Core value types (locations, query state, itineraries), the error taxonomy,
//! and the port traits that provider adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{FailureClass, ProviderError, ProviderOperation, SearchFormError, SelectionError};
