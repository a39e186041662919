//! Canonical location value.

use serde::Serialize;
use std::fmt;

/// A canonical, normalized location suggestion.
///
/// Locations are immutable and only ever produced by provider-response
/// normalization (see [`crate::infrastructure::provider::normalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    id: String,
    name: String,
    parent_area: String,
    code: String,
}

impl Location {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_area: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_area: parent_area.into(),
            code: code.into(),
        }
    }

    /// Provider entity identifier (unique key).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, e.g. "London".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the enclosing area, e.g. "United Kingdom".
    pub fn parent_area(&self) -> &str {
        &self.parent_area
    }

    /// Short code, e.g. "LOND" or "LHR".
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Label shown in the input once the location is selected: `London (LOND)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    /// Secondary line of a suggestion row: `London, United Kingdom`.
    pub fn detail(&self) -> String {
        if self.parent_area.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.parent_area)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_detail() {
        let loc = Location::new("27544008", "London", "United Kingdom", "LOND");
        assert_eq!(loc.label(), "London (LOND)");
        assert_eq!(loc.detail(), "London, United Kingdom");
        assert_eq!(loc.to_string(), "London (LOND)");
    }

    #[test]
    fn test_detail_without_parent_area() {
        let loc = Location::new("1", "Nowhere", "", "---");
        assert_eq!(loc.detail(), "Nowhere");
    }
}
