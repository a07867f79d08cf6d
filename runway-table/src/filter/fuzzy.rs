//! Global fuzzy search using nucleo-matcher.

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;

use crate::model::CellValue;
use crate::model::ColumnDef;
use crate::model::TableRow;

/// Ranks rows against a global search string.
///
/// Matching is case-insensitive and typo tolerant: the query's characters
/// must appear in order, not necessarily adjacent. Each row's rank is the best
/// score over its searchable columns; a row passes iff any column matched.
///
/// # Example
///
/// ```
/// use runway_table::filter::GlobalFilter;
///
/// let mut filter = GlobalFilter::new("asmt");
/// assert!(filter.rank_text("Assessment").is_some());
/// assert!(filter.rank_text("Roster").is_none());
/// ```
pub struct GlobalFilter {
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
}

impl std::fmt::Debug for GlobalFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalFilter").finish_non_exhaustive()
    }
}

impl GlobalFilter {
    /// Creates a filter for the given search text.
    pub fn new(query: &str) -> Self {
        Self {
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    /// Scores one string; `None` if it does not match.
    pub fn rank_text(&mut self, text: &str) -> Option<u32> {
        let haystack = Utf32Str::new(text, &mut self.buf);
        self.pattern.score(haystack, &mut self.matcher)
    }

    /// Scores one cell. Null cells never match.
    pub fn rank_cell(&mut self, cell: &CellValue) -> Option<u32> {
        match cell {
            CellValue::Null => None,
            other => self.rank_text(&other.to_display_string()),
        }
    }

    /// Scores a row: the best score across its searchable columns.
    pub fn rank_row<R: TableRow>(&mut self, row: &R, columns: &[ColumnDef]) -> Option<u32> {
        columns
            .iter()
            .filter(|column| column.searchable)
            .filter_map(|column| self.rank_cell(&row.value(&column.id)))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JsonRow;

    #[test]
    fn test_subsequence_match() {
        let mut filter = GlobalFilter::new("stdnt");
        assert!(filter.rank_text("Student assessment").is_some());
        assert!(filter.rank_text("School").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        let mut filter = GlobalFilter::new("MAP");
        assert!(filter.rank_text("map growth").is_some());
    }

    #[test]
    fn test_better_match_scores_higher() {
        let mut filter = GlobalFilter::new("star");
        let exact = filter.rank_text("star").unwrap();
        let scattered = filter.rank_text("s_t_a_r").unwrap();
        assert!(exact > scattered);
    }

    #[test]
    fn test_rank_row_uses_searchable_columns() {
        let columns = vec![
            ColumnDef::new("name", "Name"),
            ColumnDef::new("secret", "Secret").unsearchable(),
        ];
        let row = JsonRow::new("1").set("name", "Roster").set("secret", "assessment");
        let mut filter = GlobalFilter::new("assessment");
        assert_eq!(filter.rank_row(&row, &columns), None);

        let mut filter = GlobalFilter::new("rost");
        assert!(filter.rank_row(&row, &columns).is_some());
    }
}
