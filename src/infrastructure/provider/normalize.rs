//! Provider response normalization.
//!
//! The provider's JSON is loosely shaped: fields may be missing, ids may be
//! strings or numbers, and the candidate collection itself may be absent.
//! Everything here works on `serde_json::Value` so a surprising shape
//! degrades to placeholders or an empty list instead of a parse failure.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

use crate::domain::models::{Itinerary, Location};

/// Display name used when a candidate carries no usable title.
pub const PLACEHOLDER_NAME: &str = "Unknown location";

/// Short code used when a candidate carries no usable code.
pub const PLACEHOLDER_CODE: &str = "---";

/// Carrier name used when an itinerary lists no marketing carrier.
pub const UNKNOWN_CARRIER: &str = "Unknown Airline";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Normalize a location lookup body into canonical locations.
///
/// A missing or non-array `data` collection yields an empty list. Candidates
/// without an identifier are dropped; missing names and codes are replaced
/// with placeholders.
pub fn normalize_candidates(body: &Value) -> Vec<Location> {
    let Some(raw) = body.get("data").and_then(Value::as_array) else {
        debug!("lookup response has no candidate list, treating as zero matches");
        return Vec::new();
    };

    raw.iter().filter_map(normalize_candidate).collect()
}

fn normalize_candidate(raw: &Value) -> Option<Location> {
    let Some(id) = identifier(raw.get("entityId")) else {
        debug!("dropping lookup candidate without identifier");
        return None;
    };

    let presentation = raw.get("presentation");
    let name = non_blank(presentation.and_then(|p| p.get("title")))
        .or_else(|| non_blank(presentation.and_then(|p| p.get("suggestionTitle"))))
        .unwrap_or(PLACEHOLDER_NAME);
    let parent_area = non_blank(presentation.and_then(|p| p.get("subtitle"))).unwrap_or("");
    let code = non_blank(raw.get("skyId")).unwrap_or(PLACEHOLDER_CODE);

    Some(Location::new(id, name, parent_area, code))
}

/// Normalize an itinerary search body.
///
/// Each itinerary is described by its first leg. Itineraries without a leg or
/// with unparseable timestamps are dropped.
pub fn normalize_itineraries(body: &Value) -> Vec<Itinerary> {
    body.get("data")
        .and_then(|data| data.get("itineraries"))
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(normalize_itinerary).collect())
        .unwrap_or_default()
}

fn normalize_itinerary(raw: &Value) -> Option<Itinerary> {
    let id = identifier(raw.get("id"))?;
    let leg = raw.get("legs").and_then(Value::as_array)?.first()?;

    let departure = timestamp(leg.get("departure"))?;
    let arrival = timestamp(leg.get("arrival"))?;

    let price_amount = raw
        .get("price")
        .and_then(|p| p.get("raw"))
        .and_then(Value::as_f64);
    let price = non_blank(raw.get("price").and_then(|p| p.get("formatted")))
        .map(str::to_string)
        .or_else(|| price_amount.map(|amount| format!("{amount:.2}")))
        .unwrap_or_default();

    let carrier = non_blank(
        leg.get("carriers")
            .and_then(|c| c.get("marketing"))
            .and_then(Value::as_array)
            .and_then(|m| m.first())
            .and_then(|c| c.get("name")),
    )
    .unwrap_or(UNKNOWN_CARRIER)
    .to_string();

    let duration_minutes = leg
        .get("durationInMinutes")
        .and_then(Value::as_u64)
        .and_then(|m| u32::try_from(m).ok())
        .unwrap_or_else(|| {
            u32::try_from((arrival - departure).num_minutes().max(0)).unwrap_or(u32::MAX)
        });
    let stops = leg
        .get("stopCount")
        .and_then(Value::as_u64)
        .and_then(|s| u32::try_from(s).ok())
        .unwrap_or(0);

    Some(Itinerary {
        id,
        price,
        price_amount,
        carrier,
        departure,
        arrival,
        duration_minutes,
        stops,
    })
}

fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn timestamp(value: Option<&Value>) -> Option<NaiveDateTime> {
    let raw = value?.as_str()?;
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}
