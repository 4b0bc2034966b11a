//! Hand-written FHIR primitive wrappers referenced by generated code.
//!
//! FHIR date/time literals carry their precision in the literal itself
//! (`2024`, `2024-03`, `2024-03-15`, `2024-03-15T10:00:00Z`), and
//! decimals are significant down to their textual representation.
//! All wrappers are transparent newtypes so the wire form survives a
//! round trip untouched.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Precision carried by a [`FhirDateTime`] literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimePrecision {
    /// Year only, e.g. `2024`
    Year,
    /// Year and month, e.g. `2024-03`
    Month,
    /// Full date, e.g. `2024-03-15`
    Day,
    /// Date with time component, e.g. `2024-03-15T10:00:00Z`
    Time,
}

/// A FHIR `date` value: year, year-month or full date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirDate(pub String);

/// A FHIR `dateTime` or `instant` value, precision-tagged by its literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirDateTime(pub String);

/// A FHIR `time` value: time of day without a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirTime(pub String);

/// A FHIR `decimal` value, backed by a JSON number rather than `f64`
/// so integral decimals survive a round trip without reformatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirDecimal(pub Number);

impl FhirDateTime {
    /// Classify the precision of the literal.
    pub fn precision(&self) -> DateTimePrecision {
        if self.0.contains('T') {
            DateTimePrecision::Time
        } else {
            match self.0.matches('-').count() {
                0 => DateTimePrecision::Year,
                1 => DateTimePrecision::Month,
                _ => DateTimePrecision::Day,
            }
        }
    }
}

impl fmt::Display for FhirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FhirTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FhirDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FhirDateTime {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_precision_classification() {
        assert_eq!(FhirDateTime::from("2024").precision(), DateTimePrecision::Year);
        assert_eq!(FhirDateTime::from("2024-03").precision(), DateTimePrecision::Month);
        assert_eq!(FhirDateTime::from("2024-03-15").precision(), DateTimePrecision::Day);
        assert_eq!(
            FhirDateTime::from("2024-03-15T10:00:00+02:00").precision(),
            DateTimePrecision::Time
        );
    }

    #[test]
    fn test_transparent_round_trip() {
        let dt: FhirDateTime = serde_json::from_str(r#""2024-03""#).unwrap();
        assert_eq!(dt.0, "2024-03");
        assert_eq!(serde_json::to_string(&dt).unwrap(), r#""2024-03""#);

        let d: FhirDecimal = serde_json::from_str("1.50").unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "1.5");
    }
}
