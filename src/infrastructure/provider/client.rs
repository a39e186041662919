//! HTTP adapter implementing the lookup and itinerary ports.

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::errors::ProviderApiError;
use super::normalize::{normalize_candidates, normalize_itineraries};
use super::rate_limiter::TokenBucketRateLimiter;
use crate::domain::errors::{ProviderError, ProviderOperation};
use crate::domain::models::{Itinerary, ItineraryQuery, ProviderConfig, SearchConfig};
use crate::domain::ports::{ItinerarySearch, LocationLookup, LookupResponse};
use crate::infrastructure::logging::SecretScrubber;

const LOOKUP_PATH: &str = "/v1/flights/searchAirport";
const ITINERARY_PATH: &str = "/v2/flights/searchFlights";

/// HTTP client for the flight data provider
///
/// Provides:
/// - Connection pooling and reuse
/// - Client-side pacing via token bucket
/// - Request timeouts (surfaced as `Unknown` failures)
/// - Classification of provider failures into rate-limited / unauthorized / unknown
///
/// There are no retries: a failed lookup is retried by the next keystroke.
pub struct ProviderClient {
    http_client: ReqwestClient,
    base_url: String,
    locale: String,
    search: SearchConfig,
    rate_limiter: Arc<TokenBucketRateLimiter>,
    scrubber: SecretScrubber,
}

impl ProviderClient {
    /// Create a provider client from explicit configuration
    ///
    /// # Example
    /// ```no_run
    /// use skyroute::domain::models::ProviderConfig;
    /// use skyroute::infrastructure::provider::ProviderClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ProviderConfig {
    ///     api_key: "test-key".to_string(),
    ///     ..Default::default()
    /// };
    /// let client = ProviderClient::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderApiError::MissingCredentials);
        }
        if config.rate_limit_rps <= 0.0 || !config.rate_limit_rps.is_finite() {
            return Err(ProviderApiError::InvalidConfig(format!(
                "rate_limit_rps must be positive, got {}",
                config.rate_limit_rps
            )));
        }

        let api_key_scrubbed = if config.api_key.len() > 8 {
            format!(
                "{}...[REDACTED]",
                config.api_key.chars().take(4).collect::<String>()
            )
        } else {
            "[REDACTED]".to_string()
        };

        info!(
            base_url = %config.base_url,
            rate_limit_rps = config.rate_limit_rps,
            timeout_secs = config.timeout_secs,
            api_key = %api_key_scrubbed,
            "initializing provider client"
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-rapidapi-key",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| ProviderApiError::InvalidHeader(format!("api key: {e}")))?,
        );
        headers.insert(
            "x-rapidapi-host",
            header::HeaderValue::from_str(&config.api_host)
                .map_err(|e| ProviderApiError::InvalidHeader(format!("api host: {e}")))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            locale: config.locale,
            search: SearchConfig::default(),
            rate_limiter: Arc::new(TokenBucketRateLimiter::new(config.rate_limit_rps)),
            scrubber: SecretScrubber::new(),
        })
    }

    /// Override the market settings used for itinerary searches.
    #[must_use]
    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Run one paced GET and return the parsed JSON body
    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ProviderApiError> {
        self.rate_limiter.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.http_client.get(&url).query(params).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Value, ProviderApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(
                status = %status,
                body = %self.scrubber.scrub_message(&body),
                "provider returned error status"
            );
            return Err(ProviderApiError::from_status(status, body));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn report(&self, err: &ProviderApiError, operation: ProviderOperation) -> ProviderError {
        let classified = err.classify(operation);
        warn!(
            class = %classified.class,
            timeout = err.is_timeout(),
            error = %self.scrubber.scrub_message(&err.to_string()),
            "provider request failed"
        );
        classified
    }
}

#[async_trait]
impl LocationLookup for ProviderClient {
    #[instrument(skip(self), fields(locale = %self.locale))]
    async fn search(&self, query: &str) -> Result<LookupResponse, ProviderError> {
        let params = [
            ("query", query.trim().to_string()),
            ("locale", self.locale.clone()),
        ];

        let body = self
            .get_json(LOOKUP_PATH, &params)
            .await
            .map_err(|e| self.report(&e, ProviderOperation::LocationLookup))?;

        let candidates = normalize_candidates(&body);
        debug!(count = candidates.len(), "location lookup succeeded");
        Ok(LookupResponse { candidates })
    }
}

#[async_trait]
impl ItinerarySearch for ProviderClient {
    #[instrument(
        skip(self, query),
        fields(origin = %query.origin.code(), destination = %query.destination.code(), date = %query.departure_date)
    )]
    async fn search_itineraries(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<Itinerary>, ProviderError> {
        let mut params = vec![
            ("originSkyId", query.origin.code().to_string()),
            ("destinationSkyId", query.destination.code().to_string()),
            ("originEntityId", query.origin.id().to_string()),
            ("destinationEntityId", query.destination.id().to_string()),
            ("date", query.departure_date.format("%Y-%m-%d").to_string()),
            ("adults", query.adults.to_string()),
            ("cabinClass", query.cabin_class.as_str().to_string()),
            ("currency", self.search.currency.clone()),
            ("market", self.search.market.clone()),
            ("countryCode", self.search.country_code.clone()),
            ("sortBy", self.search.sort_by.clone()),
        ];
        if let Some(return_date) = query.return_date {
            params.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
        }

        let body = self
            .get_json(ITINERARY_PATH, &params)
            .await
            .map_err(|e| self.report(&e, ProviderOperation::ItinerarySearch))?;

        let itineraries = normalize_itineraries(&body);
        info!(count = itineraries.len(), "itinerary search succeeded");
        Ok(itineraries)
    }
}
