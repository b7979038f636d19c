//! Serde helpers for optional numeric fields
//!
//! Unset numbers persist as `""`. Readers accept numbers, numeric strings,
//! `""` and `null`; any other value reads as unset.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

fn read_loose<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().filter(|n| n.is_finite()),
        Some(Value::String(s)) => parse_number(&s),
        _ => None,
    })
}

/// Parse trimmed text as a finite number; empty text is unset
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Convert to a whole number when the value has no fractional part
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_whole(n: f64) -> Option<u32> {
    (n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX)).then(|| n as u32)
}

/// Render a number without a trailing `.0` for whole values
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub(crate) mod optional_f64 {
    use super::*;

    #[allow(clippy::ref_option, clippy::cast_possible_truncation)]
    pub(crate) fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => s.serialize_i64(*n as i64),
            Some(n) => s.serialize_f64(*n),
            None => s.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        read_loose(d)
    }
}

pub(crate) mod optional_u32 {
    use super::*;

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S: Serializer>(value: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => s.serialize_u32(*n),
            None => s.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(read_loose(d)?.and_then(to_whole))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_handles_blank_and_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("  "), None);
        assert_eq!(parse_number("490"), Some(490.0));
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn whole_numbers_format_without_fraction() {
        assert_eq!(format_number(490.0), "490");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn to_whole_rejects_fractions_and_negatives() {
        assert_eq!(to_whole(3.0), Some(3));
        assert_eq!(to_whole(3.5), None);
        assert_eq!(to_whole(-1.0), None);
    }
}
