//! Canonical table state.
//!
//! - [`TableState`] - everything a table view persists or derives per render
//! - [`SortEntry`] - one key of a multi-column sort
//! - [`PaginationState`] - page index and size
//! - [`ColumnFilter`] / [`FilterValue`] - per-column filter values
//! - [`RowSelection`] - selected row ids
//! - [`Updater`] - literal-or-function argument accepted by every setter

mod filter;
mod pagination;
mod selection;
mod sorting;
mod updater;

use std::collections::BTreeMap;

pub use filter::ColumnFilter;
pub use filter::ColumnFiltersState;
pub use filter::FilterValue;
pub use filter::normalize_column_filters;
pub use filter::with_column_filter;
pub use pagination::PaginationState;
pub use selection::RowSelection;
pub use selection::SelectionMode;
pub use sorting::SortEntry;
pub use sorting::SortingState;
pub use updater::Updater;

/// Full state of one table view.
///
/// Pagination, sorting, column filters and the global filter are derived from
/// URL parameters on every render; row selection and expansion live with the
/// controller (or the host page).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableState {
    /// Current page.
    pub pagination: PaginationState,
    /// Sort keys, primary first.
    pub sorting: SortingState,
    /// Active column filters, at most one per column.
    pub column_filters: ColumnFiltersState,
    /// Global search text; never `Some("")`.
    pub global_filter: Option<String>,
    /// Selected rows.
    pub row_selection: RowSelection,
    /// Expanded rows, by id.
    pub expanded: BTreeMap<String, bool>,
}

impl TableState {
    /// Returns the filter value for a column, if one is active.
    pub fn column_filter(&self, column_id: &str) -> Option<&FilterValue> {
        self.column_filters
            .iter()
            .find(|filter| filter.id == column_id)
            .map(|filter| &filter.value)
    }

    /// Returns the sort entry for a column, if the column is sorted.
    pub fn sort_of(&self, column_id: &str) -> Option<&SortEntry> {
        self.sorting.iter().find(|sort| sort.id == column_id)
    }

    /// Returns `true` if the given row is expanded.
    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.expanded.get(row_id).copied().unwrap_or(false)
    }

    /// Returns `true` if anything beyond a single sort key is configured.
    ///
    /// Used to decide whether the advanced settings panel starts open.
    pub fn has_advanced_settings(&self) -> bool {
        self.sorting.len() > 1 || !self.column_filters.is_empty()
    }
}
