//! Gender choice for customers and nominees

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Gender radio choice; `Unset` persists as `""`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
    /// No choice made
    #[default]
    Unset,
}

impl Gender {
    /// Selectable choices, in display order
    pub const CHOICES: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Persisted string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unset => "",
        }
    }

    /// Whether a choice has been made
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        !matches!(self, Gender::Unset)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Gender::Unset),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(FieldError::InvalidGender(s.to_string())),
        }
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn from_loose(raw: Option<serde_json::Value>) -> Option<Gender> {
    match raw {
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// Stored values are read leniently: unrecognised text reads as `Unset`
impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(from_loose(Option::deserialize(deserializer)?).unwrap_or_default())
    }
}

/// Lenient reader for externally produced values: unknown text reads as absent
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(from_loose(Option::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" MALE ".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("".parse::<Gender>().unwrap(), Gender::Unset);
        assert!("m".parse::<Gender>().is_err());
    }

    #[test]
    fn unset_round_trips_through_empty_string() {
        let json = serde_json::to_string(&Gender::Unset).unwrap();
        assert_eq!(json, "\"\"");
        let back: Gender = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Gender::Unset);
    }

    #[test]
    fn unrecognised_stored_values_read_as_unset() {
        let read = |json: &str| serde_json::from_str::<Gender>(json).unwrap();
        assert_eq!(read("\" male \""), Gender::Male);
        assert_eq!(read("\"F\""), Gender::Unset);
        assert_eq!(read("3"), Gender::Unset);
        assert_eq!(read("null"), Gender::Unset);
    }
}
