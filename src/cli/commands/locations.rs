//! One-shot location lookup.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::provider_client;
use crate::cli::output::table::TableFormatter;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Location, QueryPhase};
use crate::services::{LookupPolicy, QueryDispatch, SuggestionSession};

/// Arguments for a one-shot lookup.
#[derive(Args, Debug)]
pub struct LocationsArgs {
    /// City name or airport code
    pub query: String,
}

/// Location as printed in JSON output.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct LocationOutput {
    /// Provider entity id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Country or region.
    pub parent_area: String,
    /// Airport or city code.
    pub code: String,
}

impl From<&Location> for LocationOutput {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id().to_string(),
            name: location.name().to_string(),
            parent_area: location.parent_area().to_string(),
            code: location.code().to_string(),
        }
    }
}

/// Result of a one-shot lookup.
#[derive(Debug, Serialize)]
pub struct LocationsOutput {
    /// Query as given.
    pub query: String,
    /// Terminal phase the lookup reached.
    pub phase: QueryPhase,
    /// Candidates in provider order.
    pub locations: Vec<LocationOutput>,
    /// Failure message, if the lookup failed.
    pub message: Option<String>,
    #[serde(skip)]
    candidates: Vec<Location>,
}

impl CommandOutput for LocationsOutput {
    fn to_human(&self) -> String {
        match (&self.message, self.candidates.is_empty()) {
            (Some(message), _) => message.clone(),
            (None, true) => format!("No locations found for '{}'.", self.query),
            (None, false) => format!(
                "Found {} location(s) for '{}':\n{}",
                self.candidates.len(),
                self.query,
                TableFormatter::new().format_locations(&self.candidates)
            ),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Look up `args.query` once and print the candidates.
pub async fn execute(args: LocationsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let client = provider_client(config)?;
    let policy = LookupPolicy::from(&config.lookup);
    let session = SuggestionSession::new(client, policy);

    let dispatch = session.start_query(&args.query);
    if matches!(dispatch, QueryDispatch::BelowMinimumLength) {
        let out = LocationsOutput {
            query: args.query,
            phase: QueryPhase::Idle,
            locations: Vec::new(),
            message: Some(format!(
                "Type at least {} characters to search.",
                policy.min_query_len
            )),
            candidates: Vec::new(),
        };
        output(&out, json_mode);
        return Ok(());
    }
    dispatch.resolution().await;

    let snapshot = session.snapshot();
    let out = LocationsOutput {
        query: args.query,
        phase: snapshot.query.phase,
        locations: snapshot.query.candidates.iter().map(LocationOutput::from).collect(),
        message: snapshot.query.error.map(|e| e.message),
        candidates: snapshot.query.candidates,
    };
    output(&out, json_mode);
    Ok(())
}
