//! Column filter state

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

/// Largest integer a JSON number holds exactly in a browser.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Value of a column filter.
///
/// The shape depends on the column's [`ColumnType`](crate::model::ColumnType):
/// range columns (`date`, `duration`, `number`) hold a `[min, max]` tuple with
/// either side open, `options` and `str-equals` columns hold a single scalar.
/// The JSON form is exactly what is persisted in the `colfilter` parameter.
///
/// # Example
///
/// ```
/// use runway_table::state::FilterValue;
///
/// // At least ten rows
/// let at_least = FilterValue::at_least(10.0);
/// assert_eq!(serde_json::to_string(&at_least).unwrap(), "[10,null]");
///
/// // Equality
/// let status = FilterValue::from("Completed");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `[min, max]` range; `None` leaves that side open.
    Range(Option<f64>, Option<f64>),
    /// Boolean equality.
    Bool(bool),
    /// Numeric equality.
    Number(f64),
    /// String equality.
    String(String),
}

impl FilterValue {
    /// Creates a closed range.
    pub fn between(min: f64, max: f64) -> Self {
        FilterValue::Range(Some(min), Some(max))
    }

    /// Creates a range with only a lower bound.
    pub fn at_least(min: f64) -> Self {
        FilterValue::Range(Some(min), None)
    }

    /// Creates a range with only an upper bound.
    pub fn at_most(max: f64) -> Self {
        FilterValue::Range(None, Some(max))
    }

    /// Returns the range bounds if this is a range value.
    pub fn as_range(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            FilterValue::Range(min, max) => Some((*min, *max)),
            _ => None,
        }
    }

    /// Returns `true` if this value filters nothing out.
    ///
    /// An empty string is "no filter", never "equals the empty string".
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::String(s) => s.is_empty(),
            FilterValue::Range(None, None) => true,
            _ => false,
        }
    }

    /// Renders a scalar value the way it is compared against cells.
    pub fn to_display_string(&self) -> String {
        match self {
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::Number(n) => n.to_string(),
            FilterValue::String(s) => s.clone(),
            FilterValue::Range(min, max) => format!(
                "[{}, {}]",
                min.map_or("null".to_string(), |v| v.to_string()),
                max.map_or("null".to_string(), |v| v.to_string())
            ),
        }
    }
}

/// Whole numbers serialize without a fraction, as `JSON.stringify` writes them.
struct JsonNumber(f64);

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Range(min, max) => (min.map(JsonNumber), max.map(JsonNumber)).serialize(serializer),
            FilterValue::Bool(b) => serializer.serialize_bool(*b),
            FilterValue::Number(n) => JsonNumber(*n).serialize(serializer),
            FilterValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Number(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Number(v as f64)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::String(v.to_string())
    }
}

impl From<(Option<f64>, Option<f64>)> for FilterValue {
    fn from((min, max): (Option<f64>, Option<f64>)) -> Self {
        FilterValue::Range(min, max)
    }
}

/// A filter on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Column identifier.
    pub id: String,
    /// Filter value.
    pub value: FilterValue,
}

impl ColumnFilter {
    /// Creates a column filter.
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Active column filters, at most one per column.
pub type ColumnFiltersState = Vec<ColumnFilter>;

/// Replaces, adds or (with `None` or an empty value) removes one column's filter.
///
/// Keeps the position of an existing filter so the order of filter chips is
/// stable while editing.
pub fn with_column_filter(
    filters: &[ColumnFilter],
    column_id: &str,
    value: Option<FilterValue>,
) -> ColumnFiltersState {
    let value = value.filter(|v| !v.is_empty());
    let mut next: ColumnFiltersState = Vec::with_capacity(filters.len() + 1);
    let mut replaced = false;

    for filter in filters {
        if filter.id == column_id {
            if let Some(value) = &value {
                if !replaced {
                    next.push(ColumnFilter::new(column_id, value.clone()));
                    replaced = true;
                }
            }
        } else {
            next.push(filter.clone());
        }
    }

    if let (false, Some(value)) = (replaced, value) {
        next.push(ColumnFilter::new(column_id, value));
    }
    next
}

/// Collapses repeated column ids so each column has one filter (the last wins)
/// and drops filters that filter nothing.
pub fn normalize_column_filters(filters: ColumnFiltersState) -> ColumnFiltersState {
    let mut next: ColumnFiltersState = Vec::with_capacity(filters.len());
    for filter in filters {
        if filter.value.is_empty() {
            continue;
        }
        match next.iter_mut().find(|existing| existing.id == filter.id) {
            Some(existing) => existing.value = filter.value,
            None => next.push(filter),
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shapes() {
        let range: FilterValue = serde_json::from_str("[null, 15]").unwrap();
        assert_eq!(range, FilterValue::at_most(15.0));

        let scalar: FilterValue = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(scalar, FilterValue::from("Completed"));

        let flag: FilterValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FilterValue::Bool(true));

        let number: FilterValue = serde_json::from_str("3").unwrap();
        assert_eq!(number, FilterValue::Number(3.0));
    }

    #[test]
    fn test_whole_numbers_serialize_without_fraction() {
        let json = |value: FilterValue| serde_json::to_string(&value).unwrap();
        assert_eq!(json(FilterValue::at_least(10.0)), "[10,null]");
        assert_eq!(json(FilterValue::between(-3.0, 2.5)), "[-3,2.5]");
        assert_eq!(json(FilterValue::Number(1_709_287_200_000.0)), "1709287200000");
        assert_eq!(json(FilterValue::Number(0.25)), "0.25");
        assert_eq!(json(FilterValue::from("10")), "\"10\"");
    }

    #[test]
    fn test_with_column_filter_replaces_in_place() {
        let filters = vec![
            ColumnFilter::new("status", "Error"),
            ColumnFilter::new("rows", FilterValue::at_least(1.0)),
        ];
        let next = with_column_filter(&filters, "status", Some("Completed".into()));
        assert_eq!(next[0], ColumnFilter::new("status", "Completed"));
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_with_column_filter_empty_string_clears() {
        let filters = vec![ColumnFilter::new("name", "abc")];
        let next = with_column_filter(&filters, "name", Some("".into()));
        assert!(next.is_empty());
        let next = with_column_filter(&filters, "name", None);
        assert!(next.is_empty());
    }

    #[test]
    fn test_normalize_last_wins() {
        let filters = vec![
            ColumnFilter::new("status", "Error"),
            ColumnFilter::new("name", ""),
            ColumnFilter::new("status", "Completed"),
        ];
        assert_eq!(
            normalize_column_filters(filters),
            vec![ColumnFilter::new("status", "Completed")]
        );
    }
}
