//! Range filters for date, duration and number columns.

use crate::model::CellValue;

/// Returns `true` if the cell lies within `[min, max]`; open sides always pass.
///
/// A null or non-numeric cell fails any range that has at least one bound.
pub fn in_range(cell: &CellValue, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = cell.as_f64() else {
        return false;
    };
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

/// Which bounds a range filter editor is collecting.
///
/// This is editor state only and is never written to the URL; on load it is
/// inferred from which bounds are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// Both bounds.
    Between,
    /// Upper bound only ("less than or equal", "before").
    Less,
    /// Lower bound only ("greater than or equal", "after").
    More,
}

impl RangeMode {
    /// Infers the mode an editor opens in for an existing range.
    pub fn infer(min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (Some(_), Some(_)) => RangeMode::Between,
            (None, Some(_)) => RangeMode::Less,
            _ => RangeMode::More,
        }
    }

    /// Switches modes, returning the bounds the editor keeps.
    ///
    /// Narrowing from `Between` keeps the matching bound; swapping between
    /// `Less` and `More` clears both since neither bound carries over.
    pub fn switch_to(
        self,
        next: RangeMode,
        min: Option<f64>,
        max: Option<f64>,
    ) -> (Option<f64>, Option<f64>) {
        match (self, next) {
            (RangeMode::Between, RangeMode::Less) => (None, max),
            (RangeMode::Between, RangeMode::More) => (min, None),
            (RangeMode::Less, RangeMode::More) | (RangeMode::More, RangeMode::Less) => (None, None),
            _ => (min, max),
        }
    }

    /// Returns `true` if the editor cannot apply the given bounds in this mode.
    pub fn is_incomplete(self, min: Option<f64>, max: Option<f64>) -> bool {
        (min.is_none() && self != RangeMode::Less) || (max.is_none() && self != RangeMode::More)
    }
}

/// Limits an editor offers for the lower and upper inputs.
///
/// The lower input can go no higher than the chosen upper bound (or the data
/// maximum), and the upper input no lower than the chosen lower bound (or the
/// data minimum).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeLimits {
    /// Smallest value in the (faceted) data.
    pub data_min: Option<f64>,
    /// Largest value in the (faceted) data.
    pub data_max: Option<f64>,
    /// Highest value the lower input accepts.
    pub min_input_max: Option<f64>,
    /// Lowest value the upper input accepts.
    pub max_input_min: Option<f64>,
}

impl RangeLimits {
    /// Computes input limits from faceted bounds and the bounds being edited.
    pub fn new(faceted: Option<(f64, f64)>, min: Option<f64>, max: Option<f64>) -> Self {
        let data_min = faceted.map(|(lo, _)| lo);
        let data_max = faceted.map(|(_, hi)| hi);
        Self {
            data_min,
            data_max,
            min_input_max: max.or(data_max),
            max_input_min: min.or(data_min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_boundaries() {
        let passing: Vec<i32> = [5, 10, 15]
            .into_iter()
            .filter(|v| in_range(&CellValue::from(*v), Some(10.0), None))
            .collect();
        assert_eq!(passing, vec![10, 15]);

        assert!(in_range(&CellValue::from(15), None, Some(15.0)));
        assert!(!in_range(&CellValue::from(16), Some(0.0), Some(15.0)));
    }

    #[test]
    fn test_in_range_null_cells() {
        assert!(!in_range(&CellValue::Null, Some(0.0), None));
        assert!(!in_range(&CellValue::from("12"), Some(0.0), None));
        assert!(in_range(&CellValue::Null, None, None));
    }

    #[test]
    fn test_mode_inference() {
        assert_eq!(RangeMode::infer(Some(1.0), Some(2.0)), RangeMode::Between);
        assert_eq!(RangeMode::infer(None, Some(2.0)), RangeMode::Less);
        assert_eq!(RangeMode::infer(Some(1.0), None), RangeMode::More);
        assert_eq!(RangeMode::infer(None, None), RangeMode::More);
    }

    #[test]
    fn test_mode_switching() {
        let (min, max) = (Some(1.0), Some(2.0));
        assert_eq!(RangeMode::Between.switch_to(RangeMode::Less, min, max), (None, max));
        assert_eq!(RangeMode::Between.switch_to(RangeMode::More, min, max), (min, None));
        assert_eq!(RangeMode::Less.switch_to(RangeMode::More, None, max), (None, None));
        assert_eq!(RangeMode::More.switch_to(RangeMode::Between, min, None), (min, None));
    }

    #[test]
    fn test_is_incomplete() {
        assert!(RangeMode::Between.is_incomplete(Some(1.0), None));
        assert!(!RangeMode::Less.is_incomplete(None, Some(1.0)));
        assert!(RangeMode::More.is_incomplete(None, Some(1.0)));
    }

    #[test]
    fn test_limits() {
        let limits = RangeLimits::new(Some((0.0, 100.0)), Some(20.0), None);
        assert_eq!(limits.min_input_max, Some(100.0));
        assert_eq!(limits.max_input_min, Some(20.0));
    }
}
