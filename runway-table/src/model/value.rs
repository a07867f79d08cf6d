//! CellValue enum for dynamic cell contents

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by one cell of a table row.
///
/// Filters and sorting read rows through this type so the engine never needs
/// to know a host's concrete row struct.
///
/// # Example
///
/// ```
/// use runway_table::model::CellValue;
///
/// let name = CellValue::from("Grand Bend ISD");
/// let students = CellValue::from(1_250i64);
/// let archived = CellValue::from(false);
/// let empty = CellValue::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Any numeric value, including durations in seconds.
    Number(f64),
    /// String value.
    String(String),
    /// Point in time.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the value on the numeric axis range filters compare on.
    ///
    /// Dates map to epoch milliseconds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::DateTime(dt) => Some(dt.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Renders the value as text; null renders as the literal `null`.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => "null".to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
        }
    }

    /// Total ordering used by the row model's sort stage.
    ///
    /// Values of the same kind compare naturally (strings case-insensitively,
    /// falling back to exact comparison). Mixed kinds order by kind, and null
    /// always sorts after everything else.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Null, _) => Ordering::Greater,
            (_, CellValue::Null) => Ordering::Less,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (CellValue::String(a), CellValue::String(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Number(_) => 1,
            CellValue::DateTime(_) => 2,
            CellValue::String(_) => 3,
            CellValue::Null => 4,
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string() {
        assert_eq!(CellValue::Null.to_display_string(), "null");
        assert_eq!(CellValue::from(10.0).to_display_string(), "10");
        assert_eq!(CellValue::from(2.5).to_display_string(), "2.5");
        assert_eq!(CellValue::from(true).to_display_string(), "true");
    }

    #[test]
    fn test_sort_cmp_null_last() {
        assert_eq!(CellValue::Null.sort_cmp(&CellValue::from(1)), Ordering::Greater);
        assert_eq!(CellValue::from("a").sort_cmp(&CellValue::Null), Ordering::Less);
    }

    #[test]
    fn test_sort_cmp_strings_case_insensitive() {
        assert_eq!(
            CellValue::from("apple").sort_cmp(&CellValue::from("Banana")),
            Ordering::Less
        );
    }

    #[test]
    fn test_date_as_f64_is_epoch_ms() {
        let dt = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        assert_eq!(CellValue::from(dt).as_f64(), Some(1_700_000_000_000.0));
    }
}
