//! Table output formatting for CLI commands
//!
//! Renders location candidates and itineraries using comfy-table. Honors
//! `NO_COLOR` and dumb terminals.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use super::truncate;
use crate::domain::models::{Itinerary, Location};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Formatter using colors when the terminal supports them.
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Formatter with explicit color and width settings.
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format lookup candidates, numbered from 1
    pub fn format_locations(&self, locations: &[Location]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["#", "Location", "Area", "Code", "ID"]));

        for (index, location) in locations.iter().enumerate() {
            let code = if self.use_colors {
                Cell::new(location.code()).fg(Color::Cyan)
            } else {
                Cell::new(location.code())
            };
            table.add_row(vec![
                Cell::new(index + 1).set_alignment(CellAlignment::Right),
                Cell::new(truncate(location.name(), 40)),
                Cell::new(truncate(location.parent_area(), 30)),
                code,
                Cell::new(location.id()),
            ]);
        }

        table.to_string()
    }

    /// Format itineraries in provider order
    pub fn format_itineraries(&self, itineraries: &[Itinerary]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&[
            "Carrier", "Departure", "Arrival", "Duration", "Stops", "Price",
        ]));

        for itinerary in itineraries {
            let stops = if self.use_colors {
                Cell::new(itinerary.stops_label()).fg(stops_color(itinerary.stops))
            } else {
                Cell::new(itinerary.stops_label())
            };
            let price = if self.use_colors {
                Cell::new(&itinerary.price).add_attribute(Attribute::Bold)
            } else {
                Cell::new(&itinerary.price)
            };
            table.add_row(vec![
                Cell::new(truncate(&itinerary.carrier, 30)),
                Cell::new(itinerary.departure.format("%Y-%m-%d %H:%M")),
                Cell::new(itinerary.arrival.format("%Y-%m-%d %H:%M")),
                Cell::new(itinerary.duration_label()),
                stops,
                price.set_alignment(CellAlignment::Right),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn stops_color(stops: u32) -> Color {
    match stops {
        0 => Color::Green,
        1 => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn plain() -> TableFormatter {
        TableFormatter::with_config(false, Some(120))
    }

    #[test]
    fn test_format_locations() {
        let locations = vec![
            Location::new("27544008", "London", "United Kingdom", "LOND"),
            Location::new("95565050", "London Heathrow", "United Kingdom", "LHR"),
        ];
        let rendered = plain().format_locations(&locations);
        assert!(rendered.contains("London Heathrow"));
        assert!(rendered.contains("LHR"));
        assert!(rendered.contains("27544008"));
        assert!(rendered.contains("Code"));
    }

    #[test]
    fn test_format_itineraries() {
        let departure = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .unwrap();
        let itinerary = Itinerary {
            id: "it-1".to_string(),
            price: "$1,203".to_string(),
            price_amount: Some(1203.0),
            carrier: "British Airways".to_string(),
            departure,
            arrival: departure + chrono::Duration::minutes(485),
            duration_minutes: 485,
            stops: 1,
        };
        let rendered = plain().format_itineraries(&[itinerary]);
        assert!(rendered.contains("British Airways"));
        assert!(rendered.contains("2025-03-14 08:30"));
        assert!(rendered.contains("8h 5m"));
        assert!(rendered.contains("1 stop"));
        assert!(rendered.contains("$1,203"));
    }

    #[test]
    fn test_stops_color() {
        assert_eq!(stops_color(0), Color::Green);
        assert_eq!(stops_color(1), Color::Yellow);
        assert_eq!(stops_color(4), Color::Red);
    }
}
