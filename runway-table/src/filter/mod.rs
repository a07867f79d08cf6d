//! Filter evaluators.
//!
//! - [`range`] - `[min, max]` predicates for date, duration and number columns
//! - [`date`] / [`duration`] - unit handling for range filter inputs
//! - [`fuzzy`] - typo-tolerant global search ranking
//! - [`label`] - human-readable filter descriptions

pub mod date;
pub mod duration;
pub mod fuzzy;
pub mod label;
pub mod range;

use crate::model::CellValue;
use crate::model::ColumnType;
use crate::state::FilterValue;

pub use fuzzy::GlobalFilter;
pub use range::RangeMode;

/// Evaluates one column filter against one cell.
///
/// Range columns compare numerically (dates as epoch milliseconds, durations
/// as seconds). `options` and `str-equals` columns compare for equality. An
/// empty filter value always passes.
pub fn matches_column_filter(column_type: ColumnType, filter: &FilterValue, cell: &CellValue) -> bool {
    if filter.is_empty() {
        return true;
    }
    if column_type.is_range() {
        return match filter.as_range() {
            Some((min, max)) => range::in_range(cell, min, max),
            // A scalar on a range column means "exactly this value".
            None => equals(filter, cell),
        };
    }
    equals(filter, cell)
}

/// Equality between a scalar filter value and a cell.
pub fn equals(filter: &FilterValue, cell: &CellValue) -> bool {
    match (filter, cell) {
        (_, CellValue::Null) => false,
        (FilterValue::Bool(expected), CellValue::Bool(actual)) => expected == actual,
        (FilterValue::Number(expected), _) => match cell.as_f64() {
            Some(actual) => actual == *expected,
            None => expected.to_string() == cell.to_display_string(),
        },
        (FilterValue::String(expected), _) => *expected == cell.to_display_string(),
        (FilterValue::Bool(expected), _) => expected.to_string() == cell.to_display_string(),
        (FilterValue::Range(min, max), _) => range::in_range(cell, *min, *max),
    }
}
