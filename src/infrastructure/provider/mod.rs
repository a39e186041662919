//! Flight data provider adapter
//!
//! Implements the `LocationLookup` and `ItinerarySearch` ports over HTTP.

pub mod client;
pub mod errors;
pub mod normalize;
pub mod rate_limiter;

pub use client::ProviderClient;
pub use errors::ProviderApiError;
pub use normalize::{normalize_candidates, normalize_itineraries};
pub use rate_limiter::TokenBucketRateLimiter;
