//! Human-readable descriptions of active column filters.

use chrono::FixedOffset;

use super::date::format_medium;
use super::duration::format_duration;
use crate::model::ColumnType;
use crate::state::FilterValue;

/// Describes a column filter for a filter chip, e.g. `After 3/1/2024 12:00 pm`
/// or `≥ 1,000`. `None` renders as `No filter`.
pub fn describe_filter(
    column_type: ColumnType,
    value: Option<&FilterValue>,
    offset: FixedOffset,
) -> String {
    let Some(value) = value else {
        return "No filter".to_string();
    };

    if let (true, Some((min, max))) = (column_type.is_range(), value.as_range()) {
        let fmt = |v: f64| match column_type {
            ColumnType::Date => format_medium(v, offset),
            ColumnType::Duration => format_duration(v),
            _ => format_number(v),
        };
        let (below, above) = match column_type {
            ColumnType::Date => ("Before", "After"),
            _ => ("≤", "≥"),
        };
        return match (min, max) {
            (Some(min), Some(max)) => format!("{} to {}", fmt(min), fmt(max)),
            (Some(min), None) => format!("{} {}", above, fmt(min)),
            (None, Some(max)) => format!("{} {}", below, fmt(max)),
            (None, None) => "No filter".to_string(),
        };
    }

    value.to_display_string()
}

/// Formats a number with thousands separators, e.g. `1,234,567.5`.
pub fn format_number(value: f64) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return text;
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_number_labels() {
        let label = |v: FilterValue| describe_filter(ColumnType::Number, Some(&v), utc());
        assert_eq!(label(FilterValue::between(1.0, 2500.0)), "1 to 2,500");
        assert_eq!(label(FilterValue::at_least(0.0)), "≥ 0");
        assert_eq!(label(FilterValue::at_most(10.0)), "≤ 10");
    }

    #[test]
    fn test_date_labels() {
        let value = FilterValue::at_least(1_709_294_400_000.0);
        assert_eq!(
            describe_filter(ColumnType::Date, Some(&value), utc()),
            "After 3/1/2024 12:00 pm"
        );
        let value = FilterValue::at_most(1_709_294_400_000.0);
        assert_eq!(
            describe_filter(ColumnType::Date, Some(&value), utc()),
            "Before 3/1/2024 12:00 pm"
        );
    }

    #[test]
    fn test_duration_labels() {
        let value = FilterValue::between(60.0, 7_200.0);
        assert_eq!(
            describe_filter(ColumnType::Duration, Some(&value), utc()),
            "1m to 2h"
        );
    }

    #[test]
    fn test_scalar_and_missing() {
        let value = FilterValue::from("Completed");
        assert_eq!(describe_filter(ColumnType::Options, Some(&value), utc()), "Completed");
        assert_eq!(describe_filter(ColumnType::Options, None, utc()), "No filter");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(-1_234_567.5), "-1,234,567.5");
    }
}
