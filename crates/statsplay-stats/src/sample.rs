//! Sample entries and comma-separated sample text
//!
//! The demos take their data from a text box: comma-separated numbers,
//! optionally interleaved with `null` markers for missing observations.

use serde::{Deserialize, Serialize};

/// One observation of a sample that may contain missing values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum SampleEntry {
    /// A numeric observation
    Value(f64),
    /// An explicitly missing observation
    Missing,
}

impl SampleEntry {
    /// The numeric value, if present
    pub fn value(&self) -> Option<f64> {
        match self {
            SampleEntry::Value(v) => Some(*v),
            SampleEntry::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SampleEntry::Missing)
    }
}

impl From<f64> for SampleEntry {
    fn from(value: f64) -> Self {
        SampleEntry::Value(value)
    }
}

impl From<Option<f64>> for SampleEntry {
    fn from(value: Option<f64>) -> Self {
        value.map_or(SampleEntry::Missing, SampleEntry::Value)
    }
}

/// Marker token for a missing observation
pub const MISSING_TOKEN: &str = "null";

/// Parse comma-separated numbers, dropping anything that is not a finite number
pub fn parse_values(text: &str) -> Vec<f64> {
    parse_entries(text)
        .into_iter()
        .filter_map(|e| e.value())
        .collect()
}

/// Parse comma-separated entries, keeping `null` markers as [`SampleEntry::Missing`]
///
/// Empty tokens and tokens that are neither numbers nor the missing marker
/// are skipped.
pub fn parse_entries(text: &str) -> Vec<SampleEntry> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            if token.eq_ignore_ascii_case(MISSING_TOKEN) {
                return Some(SampleEntry::Missing);
            }
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(SampleEntry::Value(v)),
                _ => {
                    tracing::trace!("Skipping unparseable sample token {:?}", token);
                    None
                }
            }
        })
        .collect()
}

/// Render entries back to sample text (two decimals, `null` for missing)
pub fn format_entries(entries: &[SampleEntry]) -> String {
    entries
        .iter()
        .map(|e| match e {
            SampleEntry::Value(v) => format!("{:.2}", v),
            SampleEntry::Missing => MISSING_TOKEN.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Numeric values of a sample, missing entries excluded
pub fn numeric_values(entries: &[SampleEntry]) -> Vec<f64> {
    entries.iter().filter_map(|e| e.value()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let values = parse_values("1, 2.5,abc,, 4 ,null");
        assert_eq!(values, vec![1.0, 2.5, 4.0]);
    }

    #[test]
    fn test_parse_entries_keeps_missing() {
        let entries = parse_entries("10.5,null, NULL ,3");
        assert_eq!(
            entries,
            vec![
                SampleEntry::Value(10.5),
                SampleEntry::Missing,
                SampleEntry::Missing,
                SampleEntry::Value(3.0),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_values("inf, NaN, -inf").is_empty());
    }

    #[test]
    fn test_format_entries() {
        let text = format_entries(&[
            SampleEntry::Value(1.0),
            SampleEntry::Missing,
            SampleEntry::Value(2.346),
        ]);
        assert_eq!(text, "1.00,null,2.35");
    }

    #[test]
    fn test_entry_conversions() {
        assert_eq!(SampleEntry::from(None), SampleEntry::Missing);
        assert_eq!(SampleEntry::from(Some(2.0)).value(), Some(2.0));
        assert!(SampleEntry::Missing.is_missing());
    }
}
