//! Port for search-as-you-type location lookups.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::ProviderError;
use crate::domain::models::Location;

/// Successful outcome of a location lookup.
///
/// An empty `candidates` list means "zero matches"; failures are always
/// reported through [`ProviderError`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupResponse {
    /// Normalized candidates in provider order.
    pub candidates: Vec<Location>,
}

/// Remote location search.
///
/// Callers pass a query that is already trimmed and at least the minimum
/// length long. Implementations never return a partial success: either every
/// usable candidate is normalized into a [`Location`], or the call fails with
/// exactly one failure class.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Look up locations matching `query`.
    async fn search(&self, query: &str) -> Result<LookupResponse, ProviderError>;
}
