//! Sort configuration and field ordering

use mswasth_record::{Field, PolicyRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// The other direction
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Column marker
    #[inline]
    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort: optional key plus direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Field sorted on; `None` keeps input order
    pub key: Option<Field>,
    /// Direction
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort on `field`
    #[inline]
    #[must_use]
    pub fn ascending(field: Field) -> Self {
        Self {
            key: Some(field),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `field`
    #[inline]
    #[must_use]
    pub fn descending(field: Field) -> Self {
        Self {
            key: Some(field),
            direction: SortDirection::Descending,
        }
    }

    /// Column-header click: same field flips direction, a new field starts ascending
    #[must_use]
    pub fn request(self, field: Field) -> Self {
        if self.key == Some(field) {
            Self {
                key: Some(field),
                direction: self.direction.flipped(),
            }
        } else {
            Self::ascending(field)
        }
    }
}

/// Ascending order of two records on one field
///
/// Numeric fields compare numerically with unset values first; every other
/// field compares its string representation.
#[must_use]
pub fn compare_by(field: Field, a: &PolicyRecord, b: &PolicyRecord) -> Ordering {
    match field {
        Field::Premium => compare_numbers(a.premium, b.premium),
        Field::Tenure => compare_numbers(a.tenure.map(f64::from), b.tenure.map(f64::from)),
        other => a.display(other).cmp(&b.display(other)),
    }
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_toggles_then_resets() {
        let config = SortConfig::default().request(Field::CustomerName);
        assert_eq!(config, SortConfig::ascending(Field::CustomerName));

        let config = config.request(Field::CustomerName);
        assert_eq!(config, SortConfig::descending(Field::CustomerName));

        let config = config.request(Field::Premium);
        assert_eq!(config, SortConfig::ascending(Field::Premium));
    }

    #[test]
    fn premiums_compare_numerically() {
        let mut small = PolicyRecord::empty();
        small.premium = Some(99.0);
        let mut large = PolicyRecord::empty();
        large.premium = Some(1000.0);
        let unset = PolicyRecord::empty();

        assert_eq!(compare_by(Field::Premium, &small, &large), Ordering::Less);
        assert_eq!(compare_by(Field::Premium, &unset, &small), Ordering::Less);
    }
}
