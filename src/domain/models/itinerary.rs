//! Itinerary search inputs and results.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::location::Location;

/// Cabin class tag sent with an itinerary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    /// Standard cabin.
    #[default]
    Economy,
    /// Premium economy cabin.
    PremiumEconomy,
    /// Business cabin.
    Business,
    /// First class cabin.
    First,
}

impl CabinClass {
    /// Wire value expected by the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::PremiumEconomy => "premium_economy",
            Self::Business => "business",
            Self::First => "first",
        }
    }

    /// Human-readable name for tables.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::PremiumEconomy => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "economy" => Ok(Self::Economy),
            "premium_economy" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            other => Err(format!(
                "Invalid cabin class: {other}. Must be one of: economy, premium_economy, business, first"
            )),
        }
    }
}

/// A validated itinerary search built from two resolved locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryQuery {
    /// Where the trip starts.
    pub origin: Location,
    /// Where the trip ends.
    pub destination: Location,
    /// Outbound date.
    pub departure_date: NaiveDate,
    /// Inbound date for round trips.
    pub return_date: Option<NaiveDate>,
    /// Adult passengers, 1..=9.
    pub adults: u8,
    /// Requested cabin.
    pub cabin_class: CabinClass,
}

/// One normalized itinerary returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Provider itinerary id.
    pub id: String,
    /// Provider-formatted price, e.g. "$1,203".
    pub price: String,
    /// Raw numeric price when the provider sends one.
    pub price_amount: Option<f64>,
    /// Marketing carrier of the first leg, or "Unknown Airline".
    pub carrier: String,
    /// Local departure time of the first leg.
    pub departure: NaiveDateTime,
    /// Local arrival time of the first leg.
    pub arrival: NaiveDateTime,
    /// Duration of the first leg.
    pub duration_minutes: u32,
    /// Stops on the first leg.
    pub stops: u32,
}

impl Itinerary {
    /// `"7h 25m"`.
    pub fn duration_label(&self) -> String {
        format!("{}h {}m", self.duration_minutes / 60, self.duration_minutes % 60)
    }

    /// `"Direct"`, `"1 stop"` or `"N stops"`.
    pub fn stops_label(&self) -> String {
        match self.stops {
            0 => "Direct".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{n} stops"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itinerary(duration_minutes: u32, stops: u32) -> Itinerary {
        let departure = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(6, 0, 0))
            .unwrap();
        Itinerary {
            id: "13542-2503140600--32171-0-12712-2503141340".to_string(),
            price: "$420".to_string(),
            price_amount: Some(420.0),
            carrier: "Delta".to_string(),
            departure,
            arrival: departure + chrono::Duration::minutes(i64::from(duration_minutes)),
            duration_minutes,
            stops,
        }
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(itinerary(445, 0).duration_label(), "7h 25m");
        assert_eq!(itinerary(60, 0).duration_label(), "1h 0m");
        assert_eq!(itinerary(59, 0).duration_label(), "0h 59m");
    }

    #[test]
    fn test_stops_label() {
        assert_eq!(itinerary(90, 0).stops_label(), "Direct");
        assert_eq!(itinerary(90, 1).stops_label(), "1 stop");
        assert_eq!(itinerary(90, 3).stops_label(), "3 stops");
    }

    #[test]
    fn test_cabin_class_parsing() {
        assert_eq!("economy".parse::<CabinClass>(), Ok(CabinClass::Economy));
        assert_eq!(
            "Premium Economy".parse::<CabinClass>(),
            Ok(CabinClass::PremiumEconomy)
        );
        assert_eq!(
            "premium-economy".parse::<CabinClass>(),
            Ok(CabinClass::PremiumEconomy)
        );
        assert_eq!("FIRST".parse::<CabinClass>(), Ok(CabinClass::First));
        assert!("steerage".parse::<CabinClass>().is_err());
    }

    #[test]
    fn test_cabin_class_wire_value() {
        assert_eq!(CabinClass::PremiumEconomy.as_str(), "premium_economy");
        assert_eq!(CabinClass::PremiumEconomy.display_name(), "Premium Economy");
        assert_eq!(CabinClass::default(), CabinClass::Economy);
    }
}
