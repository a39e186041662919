//! Itinerary search between two looked-up locations.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use super::locations::LocationOutput;
use super::provider_client;
use crate::cli::output::progress::{create_spinner_with_message, ProgressBarExt};
use crate::cli::output::table::TableFormatter;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{CabinClass, Config, Itinerary, QueryPhase};
use crate::domain::ports::{ItinerarySearch, LocationLookup};
use crate::services::{LookupPolicy, SearchForm, SelectionField};

/// Arguments for an itinerary search.
#[derive(Args, Debug)]
pub struct FlightsArgs {
    /// Origin city or airport; the first match is used
    #[arg(long)]
    pub from: String,

    /// Destination city or airport; the first match is used
    #[arg(long)]
    pub to: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: NaiveDate,

    /// Return date (YYYY-MM-DD)
    #[arg(long)]
    pub return_date: Option<NaiveDate>,

    /// Number of adult passengers (1-9)
    #[arg(short, long, default_value_t = 1)]
    pub adults: u8,

    /// Cabin class (economy, premium_economy, business, first)
    #[arg(long, default_value = "economy")]
    pub cabin: CabinClass,
}

/// Result of an itinerary search.
#[derive(Debug, Serialize)]
pub struct FlightsOutput {
    /// Resolved origin.
    pub origin: LocationOutput,
    /// Resolved destination.
    pub destination: LocationOutput,
    /// Outbound date.
    pub departure_date: NaiveDate,
    /// Inbound date, if any.
    pub return_date: Option<NaiveDate>,
    /// Adult passengers.
    pub adults: u8,
    /// Requested cabin.
    pub cabin_class: CabinClass,
    /// Itineraries in provider order.
    pub itineraries: Vec<Itinerary>,
    #[serde(skip)]
    route: String,
}

impl CommandOutput for FlightsOutput {
    fn to_human(&self) -> String {
        if self.itineraries.is_empty() {
            return format!("No flights found for {}.", self.route);
        }
        format!(
            "{} on {} ({}, {} adult(s)):\n{}",
            self.route,
            self.departure_date,
            self.cabin_class.display_name(),
            self.adults,
            TableFormatter::new().format_itineraries(&self.itineraries)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Resolve a field to the first match of `query`.
async fn resolve_first(field: &mut SelectionField, query: &str) -> Result<()> {
    field.session().start_query(query).resolution().await;

    let snapshot = field.session().snapshot();
    match snapshot.query.phase {
        QueryPhase::Ready => {
            field.activate(0)?;
            Ok(())
        }
        QueryPhase::Failed => Err(anyhow!(
            "{}",
            snapshot.query.error.map(|e| e.message).unwrap_or_default()
        )),
        QueryPhase::Idle => bail!("{} query '{query}' is too short", field.label()),
        _ => bail!("No airports found for '{query}'"),
    }
}

/// Resolve both locations and search itineraries between them.
pub async fn execute(args: FlightsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let client = provider_client(config)?;
    let lookup: Arc<dyn LocationLookup> = client.clone();
    let mut form = SearchForm::new(lookup, LookupPolicy::from(&config.lookup));

    resolve_first(&mut form.origin, &args.from)
        .await
        .context("Failed to resolve origin")?;
    resolve_first(&mut form.destination, &args.to)
        .await
        .context("Failed to resolve destination")?;
    form.departure_date = Some(args.date);
    form.return_date = args.return_date;
    form.adults = args.adults;
    form.cabin_class = args.cabin;

    let query = form.submit()?;
    let route = format!("{} → {}", query.origin.label(), query.destination.label());

    let spinner = create_spinner_with_message(format!("Searching flights {route}..."), json_mode);
    let itineraries = match client.search_itineraries(&query).await {
        Ok(itineraries) => {
            spinner.finish_success(format!("Found {} itineraries", itineraries.len()));
            itineraries
        }
        Err(err) => {
            spinner.finish_error(&err.message);
            return Err(err.into());
        }
    };

    let out = FlightsOutput {
        origin: LocationOutput::from(&query.origin),
        destination: LocationOutput::from(&query.destination),
        departure_date: query.departure_date,
        return_date: query.return_date,
        adults: query.adults,
        cabin_class: query.cabin_class,
        itineraries,
        route,
    };
    output(&out, json_mode);
    Ok(())
}
