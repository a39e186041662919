//! Itinerary search form: two location fields plus trip details.

use chrono::NaiveDate;
use std::sync::Arc;

use super::selection_field::SelectionField;
use super::suggestion_session::LookupPolicy;
use crate::domain::errors::SearchFormError;
use crate::domain::models::{CabinClass, ItineraryQuery};
use crate::domain::ports::LocationLookup;

/// Largest party a single search may book for.
pub const MAX_ADULTS: u8 = 9;

/// Itinerary search inputs awaiting submission.
pub struct SearchForm {
    /// Departure location field.
    pub origin: SelectionField,
    /// Arrival location field.
    pub destination: SelectionField,
    /// Outbound date.
    pub departure_date: Option<NaiveDate>,
    /// Inbound date; `None` for one-way trips.
    pub return_date: Option<NaiveDate>,
    /// Adult passengers, 1..=9.
    pub adults: u8,
    /// Requested cabin.
    pub cabin_class: CabinClass,
}

impl SearchForm {
    /// Empty form for one adult in economy. Both fields share `lookup` but
    /// each owns an independent session.
    pub fn new(lookup: Arc<dyn LocationLookup>, policy: LookupPolicy) -> Self {
        Self {
            origin: SelectionField::new("From", Arc::clone(&lookup), policy),
            destination: SelectionField::new("To", lookup, policy),
            departure_date: None,
            return_date: None,
            adults: 1,
            cabin_class: CabinClass::default(),
        }
    }

    /// Validate the form into a query the itinerary search accepts.
    pub fn submit(&self) -> Result<ItineraryQuery, SearchFormError> {
        let origin = self.origin.value().ok_or(SearchFormError::MissingOrigin)?;
        let destination = self
            .destination
            .value()
            .ok_or(SearchFormError::MissingDestination)?;
        let departure_date = self
            .departure_date
            .ok_or(SearchFormError::MissingDepartureDate)?;

        if !(1..=MAX_ADULTS).contains(&self.adults) {
            return Err(SearchFormError::InvalidPassengerCount(self.adults));
        }
        if let Some(ret) = self.return_date {
            if ret < departure_date {
                return Err(SearchFormError::ReturnBeforeDeparture {
                    departure: departure_date.to_string(),
                    ret: ret.to_string(),
                });
            }
        }

        Ok(ItineraryQuery {
            origin,
            destination,
            departure_date,
            return_date: self.return_date,
            adults: self.adults,
            cabin_class: self.cabin_class,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ProviderError;
    use crate::domain::models::Location;
    use crate::domain::ports::LookupResponse;
    use async_trait::async_trait;

    struct NoLookup;

    #[async_trait]
    impl LocationLookup for NoLookup {
        async fn search(&self, _query: &str) -> Result<LookupResponse, ProviderError> {
            Ok(LookupResponse::default())
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn filled_form() -> SearchForm {
        let lookup: Arc<dyn LocationLookup> = Arc::new(NoLookup);
        let policy = LookupPolicy::default();
        SearchForm {
            origin: SelectionField::with_value(
                "From",
                Arc::clone(&lookup),
                policy,
                Some(Location::new("27544008", "London", "United Kingdom", "LOND")),
            ),
            destination: SelectionField::with_value(
                "To",
                lookup,
                policy,
                Some(Location::new("95565041", "New York", "United States", "NYCA")),
            ),
            departure_date: Some(date("2025-03-14")),
            return_date: None,
            adults: 2,
            cabin_class: CabinClass::Business,
        }
    }

    #[tokio::test]
    async fn test_submit_builds_query() {
        let query = filled_form().submit().unwrap();
        assert_eq!(query.origin.code(), "LOND");
        assert_eq!(query.destination.code(), "NYCA");
        assert_eq!(query.departure_date, date("2025-03-14"));
        assert_eq!(query.adults, 2);
        assert_eq!(query.cabin_class, CabinClass::Business);
    }

    #[tokio::test]
    async fn test_submit_requires_both_locations() {
        let form = SearchForm::new(Arc::new(NoLookup), LookupPolicy::default());
        assert_eq!(form.submit(), Err(SearchFormError::MissingOrigin));

        let mut form = filled_form();
        form.destination.clear();
        assert_eq!(form.submit(), Err(SearchFormError::MissingDestination));
    }

    #[tokio::test]
    async fn test_submit_validates_dates_and_passengers() {
        let mut form = filled_form();
        form.departure_date = None;
        assert_eq!(form.submit(), Err(SearchFormError::MissingDepartureDate));

        let mut form = filled_form();
        form.adults = 0;
        assert_eq!(form.submit(), Err(SearchFormError::InvalidPassengerCount(0)));
        form.adults = 10;
        assert_eq!(form.submit(), Err(SearchFormError::InvalidPassengerCount(10)));

        let mut form = filled_form();
        form.return_date = Some(date("2025-03-10"));
        assert!(matches!(
            form.submit(),
            Err(SearchFormError::ReturnBeforeDeparture { .. })
        ));
        form.return_date = Some(date("2025-03-21"));
        assert_eq!(form.submit().unwrap().return_date, Some(date("2025-03-21")));
    }
}
