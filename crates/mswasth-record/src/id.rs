//! Record identifiers

use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::str::FromStr;
use ulid::Ulid;

/// Opaque record identifier
///
/// Generated identifiers are ULIDs: timestamp-ordered and unique. Ids read
/// back from storage are kept verbatim, whatever scheme produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wrap an existing identifier
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no identifier has been assigned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Numeric ids from older data are kept as their text form
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::text::lenient(deserializer).map(Self)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_non_empty_and_unique() {
        let ids: HashSet<RecordId> = (0..256).map(|_| RecordId::generate()).collect();
        assert_eq!(ids.len(), 256);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::new("1717000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1717000000000\"");
    }

    #[test]
    fn numeric_ids_read_as_text() {
        let id: RecordId = serde_json::from_str("1717000000000").unwrap();
        assert_eq!(id.as_str(), "1717000000000");
    }
}
