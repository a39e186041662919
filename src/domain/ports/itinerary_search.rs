//! Port for itinerary searches.

use async_trait::async_trait;

use crate::domain::errors::ProviderError;
use crate::domain::models::{Itinerary, ItineraryQuery};

/// Remote itinerary search between two resolved locations.
///
/// Returns itineraries in provider order. Failures use the same
/// classification as [`super::LocationLookup`].
#[async_trait]
pub trait ItinerarySearch: Send + Sync {
    /// Search itineraries for a validated query.
    async fn search_itineraries(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<Itinerary>, ProviderError>;
}
